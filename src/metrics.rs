//! Summary metrics over finished process records.

use serde::Deserialize;
use serde::Serialize;

use crate::process::Process;
use crate::process::ProcessState;

/// Which processes count toward the averages. Synchronization runs can end
/// with omitted processes; whether those dilute the averages is a reporting
/// choice, not an engine property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsScope {
    /// Average over every process in the run.
    #[default]
    All,
    /// Average only over processes that completed naturally.
    TerminatedOnly,
}

/// Arithmetic means over the in-scope processes. All three are zero for an
/// empty (or fully out-of-scope) set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimMetrics {
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
}

/// Pure aggregation over finalized records; safe to call any number of
/// times. Processes that never ran (no start/finish recorded) contribute
/// their accumulated waits and zero turnaround/response.
pub fn compute_metrics(procs: &[Process], scope: MetricsScope) -> SimMetrics {
    let mut count = 0u64;
    let mut waiting = 0u64;
    let mut turnaround = 0u64;
    let mut response = 0u64;

    for p in procs {
        if scope == MetricsScope::TerminatedOnly && p.state != ProcessState::Terminated {
            continue;
        }
        count += 1;
        waiting += p.waited;
        turnaround += p.turnaround().unwrap_or(0);
        response += p.response().unwrap_or(0);
    }

    if count == 0 {
        return SimMetrics {
            avg_waiting: 0.0,
            avg_turnaround: 0.0,
            avg_response: 0.0,
        };
    }

    SimMetrics {
        avg_waiting: waiting as f64 / count as f64,
        avg_turnaround: turnaround as f64 / count as f64,
        avg_response: response as f64 / count as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(pid: &str, burst: u64, arrival: u64, start: u64, finish: u64) -> Process {
        let mut p = Process::new(pid, burst, arrival, 1).unwrap();
        p.remaining = 0;
        p.start = Some(start);
        p.finish = Some(finish);
        p.waited = finish - arrival - burst;
        p.state = ProcessState::Terminated;
        p
    }

    #[test]
    fn test_empty_set_yields_zeroes() {
        let m = compute_metrics(&[], MetricsScope::All);
        assert_eq!(m.avg_waiting, 0.0);
        assert_eq!(m.avg_turnaround, 0.0);
        assert_eq!(m.avg_response, 0.0);
    }

    #[test]
    fn test_averages() {
        // P1: waits 0, turnaround 4, response 0.
        // P2: waits 2, turnaround 6, response 2.
        let procs = vec![finished("P1", 4, 0, 0, 4), finished("P2", 4, 2, 4, 8)];
        let m = compute_metrics(&procs, MetricsScope::All);
        assert_eq!(m.avg_waiting, 1.0);
        assert_eq!(m.avg_turnaround, 5.0);
        assert_eq!(m.avg_response, 1.0);
    }

    #[test]
    fn test_scope_excludes_omitted() {
        let mut omitted = Process::new("P3", 5, 0, 1).unwrap();
        omitted.state = ProcessState::Omitted;
        omitted.waited = 10;
        let procs = vec![finished("P1", 4, 0, 0, 4), omitted];

        let all = compute_metrics(&procs, MetricsScope::All);
        let terminated = compute_metrics(&procs, MetricsScope::TerminatedOnly);
        assert_eq!(all.avg_waiting, 5.0);
        assert_eq!(terminated.avg_waiting, 0.0);
    }

    #[test]
    fn test_idempotent() {
        let procs = vec![finished("P1", 3, 1, 2, 5)];
        let a = compute_metrics(&procs, MetricsScope::All);
        let b = compute_metrics(&procs, MetricsScope::All);
        assert_eq!(a, b);
    }
}
