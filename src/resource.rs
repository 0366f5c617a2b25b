//! Shared resources, access actions, and the lock arbitration strategies.
//!
//! A [`Resource`] can be governed by one of two disciplines, selected once
//! per run: exclusive mutex or counting semaphore. Like the kernel-style
//! queues in larger schedulers, the two disciplines never mix within a run.
//!
//! Arbitration is a non-blocking, single-cycle decision: a failed
//! [`LockMode::acquire`] does not queue the requester, it simply reports
//! denial and the requester retries on a later cycle.

use serde::Deserialize;
use serde::Serialize;

use crate::types::Cycle;

/// What a process intends to do with a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Read,
    Write,
}

/// A named shared resource.
///
/// `available` carries semaphore semantics (remaining interchangeable
/// units), `locked` carries mutex semantics. Only the field matching the
/// run's [`LockMode`] is consulted.
#[derive(Debug, Clone)]
pub struct Resource {
    pub name: String,
    /// Units still available (semaphore discipline). Never goes negative.
    pub available: u64,
    /// Exclusive-hold flag (mutex discipline).
    pub locked: bool,
}

impl Resource {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Resource {
            name: name.into(),
            available: count,
            locked: false,
        }
    }
}

/// A scheduled intent for a process to use a resource at a given cycle.
///
/// Actions are consumed at most once, when the acquisition is granted. An
/// action whose cycle has passed without service stays pending and is
/// retried on later cycles.
#[derive(Debug, Clone)]
pub struct Action {
    pub pid: String,
    pub kind: ActionType,
    pub resource: String,
    pub cycle: Cycle,
}

impl Action {
    pub fn new(
        pid: impl Into<String>,
        kind: ActionType,
        resource: impl Into<String>,
        cycle: Cycle,
    ) -> Self {
        Action {
            pid: pid.into(),
            kind,
            resource: resource.into(),
            cycle,
        }
    }
}

/// The lock discipline arbitrating access to every resource in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// At most one holder at a time.
    Mutex,
    /// Up to `available` concurrent holders.
    Semaphore,
}

impl LockMode {
    /// Attempt to take one unit of `resource`. Returns whether the
    /// acquisition was granted.
    pub fn acquire(self, resource: &mut Resource) -> bool {
        match self {
            LockMode::Mutex => {
                if resource.locked {
                    false
                } else {
                    resource.locked = true;
                    true
                }
            }
            LockMode::Semaphore => {
                if resource.available > 0 {
                    resource.available -= 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Give back one previously granted unit of `resource`.
    pub fn release(self, resource: &mut Resource) {
        match self {
            LockMode::Mutex => resource.locked = false,
            LockMode::Semaphore => resource.available += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutex_exclusive() {
        let mut r = Resource::new("R1", 1);
        assert!(LockMode::Mutex.acquire(&mut r));
        assert!(!LockMode::Mutex.acquire(&mut r), "second holder denied");
        LockMode::Mutex.release(&mut r);
        assert!(LockMode::Mutex.acquire(&mut r));
    }

    #[test]
    fn test_semaphore_counts_units() {
        let mut r = Resource::new("R1", 2);
        assert!(LockMode::Semaphore.acquire(&mut r));
        assert!(LockMode::Semaphore.acquire(&mut r));
        assert!(!LockMode::Semaphore.acquire(&mut r), "no units left");
        LockMode::Semaphore.release(&mut r);
        assert_eq!(r.available, 1);
        assert!(LockMode::Semaphore.acquire(&mut r));
    }

    #[test]
    fn test_zero_unit_semaphore_never_grants() {
        let mut r = Resource::new("R1", 0);
        assert!(!LockMode::Semaphore.acquire(&mut r));
        assert_eq!(r.available, 0);
    }
}
