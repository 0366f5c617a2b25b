//! Shortest-remaining-time scheduling.

use crate::process::Process;
use crate::sched::Policy;
use crate::types::Cycle;

/// Preemptive shortest-remaining-time: re-evaluated every cycle against the
/// *remaining* work of each eligible process, so a shorter newcomer
/// preempts the running process on its arrival cycle. On equal remaining
/// work the running process keeps the CPU; between two challengers the
/// smaller priority value wins.
pub struct Srt;

impl Policy for Srt {
    fn pick(&mut self, cycle: Cycle, procs: &[Process], running: Option<usize>) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, p) in procs.iter().enumerate() {
            if !p.eligible_at(cycle) {
                continue;
            }
            best = Some(match best {
                None => i,
                Some(b) => {
                    if p.remaining < procs[b].remaining {
                        i
                    } else if p.remaining == procs[b].remaining {
                        if running == Some(b) {
                            b
                        } else if running == Some(i) || p.priority < procs[b].priority {
                            i
                        } else {
                            b
                        }
                    } else {
                        b
                    }
                }
            });
        }
        best
    }
}
