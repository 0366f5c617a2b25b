//! First-in, first-out scheduling.

use crate::process::Process;
use crate::sched::Policy;
use crate::types::Cycle;

/// Non-preemptive arrival-order scheduling: the earliest-arrived eligible
/// process gets the CPU and runs to completion. Equal arrivals break ties
/// by input order.
pub struct Fifo;

impl Policy for Fifo {
    fn pick(&mut self, cycle: Cycle, procs: &[Process], running: Option<usize>) -> Option<usize> {
        if let Some(idx) = running {
            return Some(idx);
        }
        let mut best: Option<usize> = None;
        for (i, p) in procs.iter().enumerate() {
            if !p.eligible_at(cycle) {
                continue;
            }
            match best {
                Some(b) if procs[b].arrival <= p.arrival => {}
                _ => best = Some(i),
            }
        }
        best
    }
}
