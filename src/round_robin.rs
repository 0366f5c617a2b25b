//! Round-robin scheduling.

use std::collections::VecDeque;

use crate::process::Process;
use crate::sched::Policy;
use crate::types::Cycle;

/// Quantum-bounded FIFO scheduling through an explicit ready queue.
///
/// Newly arrived processes join the tail of the queue in input order. The
/// head runs for up to `quantum` cycles or until its work is done; a
/// process whose slice expires with work remaining re-joins the tail,
/// *after* any process that arrived on the expiry cycle.
pub struct RoundRobin {
    quantum: u64,
    queue: VecDeque<usize>,
    admitted: Vec<bool>,
    current: Option<usize>,
    /// Cycles the current process has already used of its slice.
    used: u64,
    /// Set when the last pick admitted a process from the queue head.
    fresh: bool,
}

impl RoundRobin {
    /// `quantum` must be positive; `SchedConfig::validate` enforces this
    /// before the engine constructs the policy.
    pub fn new(quantum: u64) -> Self {
        RoundRobin {
            quantum,
            queue: VecDeque::new(),
            admitted: Vec::new(),
            current: None,
            used: 0,
            fresh: false,
        }
    }
}

impl Policy for RoundRobin {
    fn pick(&mut self, cycle: Cycle, procs: &[Process], _running: Option<usize>) -> Option<usize> {
        if self.admitted.is_empty() {
            self.admitted = vec![false; procs.len()];
        }

        for (i, p) in procs.iter().enumerate() {
            if !self.admitted[i] && p.arrival <= cycle {
                self.admitted[i] = true;
                self.queue.push_back(i);
            }
        }

        if let Some(i) = self.current {
            if !procs[i].eligible_at(cycle) {
                // Finished inside its slice.
                self.current = None;
                self.used = 0;
            } else if self.used == self.quantum {
                // Slice expired with work left: back of the queue.
                self.queue.push_back(i);
                self.current = None;
                self.used = 0;
            }
        }

        if self.current.is_none() {
            while let Some(i) = self.queue.pop_front() {
                if procs[i].eligible_at(cycle) {
                    self.current = Some(i);
                    self.fresh = true;
                    break;
                }
            }
        }

        if let Some(i) = self.current {
            self.used += 1;
            Some(i)
        } else {
            None
        }
    }

    fn opened_slice(&mut self) -> bool {
        std::mem::take(&mut self.fresh)
    }
}
