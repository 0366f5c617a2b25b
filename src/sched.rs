//! The cycle-stepped scheduling engine.
//!
//! One loop drives every policy: each cycle it emits `NEW` markers for
//! arrivals, asks the policy which process gets the CPU, records `WAITING`
//! for every eligible process that was passed over, runs the selection for
//! one cycle, and emits the `TERMINATED` marker when a process's remaining
//! work hits zero. Policies only answer the selection question; all state
//! transitions, event emission, and timing derivation live here.

use anyhow::Result;
use tracing::debug;
use tracing::info;

use crate::config::SchedAlgorithm;
use crate::config::SchedConfig;
use crate::fifo::Fifo;
use crate::priority::Priority;
use crate::process::Process;
use crate::process::ProcessState;
use crate::round_robin::RoundRobin;
use crate::sjf::Sjf;
use crate::srt::Srt;
use crate::timeline::Timeline;
use crate::types::Cycle;

/// A scheduling policy: a per-cycle answer to "who runs now?".
///
/// `running` is the index of the process that ran last cycle, if it still
/// has work; non-preemptive policies return it unchanged, preemptive
/// policies are free to ignore it. The returned index must be eligible at
/// `cycle` (arrived, not terminal, work remaining).
pub trait Policy {
    fn pick(&mut self, cycle: Cycle, procs: &[Process], running: Option<usize>) -> Option<usize>;

    /// Whether the last `pick` opened a fresh scheduling slice for the
    /// process it returned. The engine already breaks execution spans when
    /// the selected process changes; this hook covers Round Robin handing
    /// the same process a new quantum back-to-back.
    fn opened_slice(&mut self) -> bool {
        false
    }
}

/// Run a full scheduling simulation over `procs` with the configured
/// policy. Records are mutated in place (timing fields, final states); the
/// returned timeline is the trace of the run.
///
/// Expects freshly constructed records; an empty set yields an empty
/// timeline.
pub fn run_schedule(procs: &mut [Process], config: &SchedConfig) -> Result<Timeline> {
    config.validate()?;
    info!(
        algorithm = %config.algorithm,
        nr_procs = procs.len(),
        "starting scheduling run"
    );
    let timeline = match config.algorithm {
        SchedAlgorithm::Fifo => drive(procs, Fifo),
        SchedAlgorithm::Sjf => drive(procs, Sjf),
        SchedAlgorithm::Srt => drive(procs, Srt),
        SchedAlgorithm::RoundRobin => drive(procs, RoundRobin::new(config.quantum)),
        SchedAlgorithm::Priority => drive(procs, Priority::new(config.preemptive)),
    };
    Ok(timeline)
}

fn drive<P: Policy>(procs: &mut [Process], mut policy: P) -> Timeline {
    let mut timeline = Timeline::new();
    if procs.is_empty() {
        return timeline;
    }

    let total = procs.len();
    let mut done = 0usize;
    let mut cycle: Cycle = 0;
    let mut running: Option<usize> = None;
    let mut last_ran: Option<usize> = None;

    while done < total {
        for p in procs.iter_mut() {
            if p.arrival == cycle && p.state == ProcessState::New {
                timeline.mark(&p.pid, cycle, ProcessState::New);
                p.state = ProcessState::Waiting;
            }
        }

        let selected = policy.pick(cycle, procs, running);
        let fresh_slice = policy.opened_slice();

        for (i, p) in procs.iter_mut().enumerate() {
            if Some(i) != selected && p.eligible_at(cycle) {
                p.state = ProcessState::Waiting;
                timeline.record(&p.pid, cycle, ProcessState::Waiting, None, false);
            }
        }

        match selected {
            Some(i) => {
                let p = &mut procs[i];
                debug_assert!(p.eligible_at(cycle), "policy picked an ineligible process");
                if p.start.is_none() {
                    p.start = Some(cycle);
                }
                p.state = ProcessState::Accessed;
                let boundary = fresh_slice || last_ran != Some(i);
                timeline.record(&p.pid, cycle, ProcessState::Accessed, None, boundary);
                p.remaining -= 1;
                debug!(cycle, pid = %p.pid, remaining = p.remaining, "ran one cycle");

                if p.remaining == 0 {
                    let finish = cycle + 1;
                    p.finish = Some(finish);
                    p.waited = finish - p.arrival - p.burst;
                    p.state = ProcessState::Terminated;
                    timeline.mark(&p.pid, finish, ProcessState::Terminated);
                    debug!(cycle, pid = %p.pid, finish, "terminated");
                    done += 1;
                    running = None;
                } else {
                    running = Some(i);
                }
                last_ran = Some(i);
            }
            None => {
                debug!(cycle, "idle cycle, no eligible process");
                running = None;
                last_ran = None;
            }
        }

        cycle += 1;
    }

    timeline
}
