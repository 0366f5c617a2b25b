//! Priority scheduling, preemptive or non-preemptive.

use crate::process::Process;
use crate::sched::Policy;
use crate::types::Cycle;

/// Smallest-priority-value-first scheduling. Ties break by earlier arrival,
/// then smaller burst, then input order.
///
/// In preemptive mode the eligible set is re-evaluated every cycle and a
/// higher-priority arrival takes the CPU immediately; the displaced
/// process's partial progress is preserved in its `remaining` counter. In
/// non-preemptive mode the selected process runs to completion.
pub struct Priority {
    preemptive: bool,
}

impl Priority {
    pub fn new(preemptive: bool) -> Self {
        Priority { preemptive }
    }
}

impl Policy for Priority {
    fn pick(&mut self, cycle: Cycle, procs: &[Process], running: Option<usize>) -> Option<usize> {
        if !self.preemptive {
            if let Some(idx) = running {
                return Some(idx);
            }
        }
        let mut best: Option<usize> = None;
        for (i, p) in procs.iter().enumerate() {
            if !p.eligible_at(cycle) {
                continue;
            }
            best = Some(match best {
                None => i,
                Some(b) => {
                    let key = (p.priority, p.arrival, p.burst);
                    let best_key = (procs[b].priority, procs[b].arrival, procs[b].burst);
                    if key < best_key {
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
