//! Shortest-job-first scheduling.

use crate::process::Process;
use crate::sched::Policy;
use crate::types::Cycle;

/// Non-preemptive shortest-job-first: among the eligible processes the one
/// with the smallest original burst wins, with earlier arrival breaking
/// ties, and runs to completion.
pub struct Sjf;

impl Policy for Sjf {
    fn pick(&mut self, cycle: Cycle, procs: &[Process], running: Option<usize>) -> Option<usize> {
        if let Some(idx) = running {
            return Some(idx);
        }
        let mut best: Option<usize> = None;
        for (i, p) in procs.iter().enumerate() {
            if !p.eligible_at(cycle) {
                continue;
            }
            best = Some(match best {
                None => i,
                Some(b) => {
                    if (p.burst, p.arrival) < (procs[b].burst, procs[b].arrival) {
                        i
                    } else {
                        b
                    }
                }
            });
        }
        best
    }
}
