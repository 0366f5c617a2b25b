//! Process records and their lifecycle states.
//!
//! A [`Process`] is the passive record every engine operates on: identity,
//! the work it needs, when it becomes eligible, and the timing fields the
//! engines fill in. Records are constructed once per run, mutated only by
//! the engine driving the run, and read-only afterwards for metrics.

use anyhow::bail;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use crate::types::Cycle;

/// The lifecycle states a simulated process moves through.
///
/// `New` is emitted exactly once at the arrival cycle. `Waiting` and
/// `Accessed` then alternate while the process contends for the CPU or a
/// resource. `Terminated` and `Omitted` are terminal and mutually
/// exclusive: `Omitted` marks a process the synchronization engine gave up
/// on, never natural completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    New,
    Waiting,
    Accessed,
    Terminated,
    Omitted,
}

impl ProcessState {
    /// Whether this state ends the process's participation in the run.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessState::Terminated | ProcessState::Omitted)
    }
}

/// A simulated process.
///
/// `burst` is the originally requested work and is never overwritten;
/// `remaining` is the engine-decremented counter. Keeping both means
/// consumed/pending work can always be reported, regardless of which
/// engine ran the record.
#[derive(Debug, Clone)]
pub struct Process {
    /// Identity, unique within a run.
    pub pid: String,
    /// Total cycles of work requested. Immutable after construction.
    pub burst: u64,
    /// Cycles of work still to do.
    pub remaining: u64,
    /// First cycle at which the process is eligible to run.
    pub arrival: Cycle,
    /// Scheduling priority; a lower value means higher priority.
    pub priority: u32,
    /// First cycle the process was granted the CPU (or a resource).
    /// Set exactly once.
    pub start: Option<Cycle>,
    /// Cycle after the last cycle of work. Set exactly once.
    pub finish: Option<Cycle>,
    /// Accumulated cycles spent waiting.
    pub waited: u64,
    /// Current lifecycle state.
    pub state: ProcessState,
}

impl Process {
    /// Create a process record. A zero burst is a construction-time error:
    /// such a process could never make progress under any policy.
    pub fn new(pid: impl Into<String>, burst: u64, arrival: Cycle, priority: u32) -> Result<Self> {
        let pid = pid.into();
        if pid.is_empty() {
            bail!("process pid must not be empty");
        }
        if burst == 0 {
            bail!("process {} has zero burst time", pid);
        }
        Ok(Process {
            pid,
            burst,
            remaining: burst,
            arrival,
            priority,
            start: None,
            finish: None,
            waited: 0,
            state: ProcessState::New,
        })
    }

    /// Whether the process can be selected at `cycle`: it has arrived, is
    /// not in a terminal state, and still has work to do.
    pub fn eligible_at(&self, cycle: Cycle) -> bool {
        self.arrival <= cycle && !self.state.is_terminal() && self.remaining > 0
    }

    /// Turnaround time (finish minus arrival), once the process is done.
    pub fn turnaround(&self) -> Option<u64> {
        self.finish.map(|f| f.saturating_sub(self.arrival))
    }

    /// Response time (first execution minus arrival), once the process has
    /// run at least one cycle.
    pub fn response(&self) -> Option<u64> {
        self.start.map(|s| s.saturating_sub(self.arrival))
    }

    /// Cycles of work already consumed.
    pub fn consumed(&self) -> u64 {
        self.burst - self.remaining
    }
}
