//! Timeline event recording.
//!
//! Every state a process holds (waiting, granted the CPU or a resource) is
//! recorded in a [`Timeline`] as a [`TimelineEvent`] spanning a half-open
//! cycle interval. The timeline is the observable trace of a run: engines
//! only append, consumers only read.
//!
//! Spans coalesce as they are recorded: a cycle that continues the
//! process's previous state extends the open span, while a state change, a
//! gap, or a fresh scheduling slice (a Round Robin re-admission) opens a
//! new one. `NEW` and the terminal states are zero-width markers at the
//! arrival and finish cycle respectively, so for each process the
//! recorded spans cover `[arrival, finish)` with no gaps or overlaps.

use serde::Deserialize;
use serde::Serialize;

use crate::process::ProcessState;
use crate::resource::ActionType;
use crate::types::Cycle;

/// A single timeline event: one process held one state over one cycle
/// interval. Synchronization runs additionally tag resource events with
/// the action type that triggered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub pid: String,
    pub start_cycle: Cycle,
    pub end_cycle: Cycle,
    pub state: ProcessState,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub action: Option<ActionType>,
}

/// A complete run trace, events ordered by when their span opened.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
}

impl Timeline {
    pub(crate) fn new() -> Self {
        Timeline { events: Vec::new() }
    }

    /// Record that `pid` held `state` during `[cycle, cycle + 1)`. The
    /// cycle extends the process's open span when it continues the same
    /// state and tag without a gap; `fresh` forces a new span regardless
    /// (quantum boundaries).
    pub(crate) fn record(
        &mut self,
        pid: &str,
        cycle: Cycle,
        state: ProcessState,
        action: Option<ActionType>,
        fresh: bool,
    ) {
        if !fresh {
            if let Some(last) = self.events.iter_mut().rev().find(|e| e.pid == pid) {
                if last.state == state
                    && last.action == action
                    && last.end_cycle == cycle
                    && last.end_cycle > last.start_cycle
                {
                    last.end_cycle = cycle + 1;
                    return;
                }
            }
        }
        self.events.push(TimelineEvent {
            pid: pid.to_string(),
            start_cycle: cycle,
            end_cycle: cycle + 1,
            state,
            action,
        });
    }

    /// Append a zero-width marker event (`NEW` and the terminal states).
    pub(crate) fn mark(&mut self, pid: &str, cycle: Cycle, state: ProcessState) {
        self.events.push(TimelineEvent {
            pid: pid.to_string(),
            start_cycle: cycle,
            end_cycle: cycle,
            state,
            action: None,
        });
    }

    /// All events, ordered by span-open time.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The events of a single process, in order.
    pub fn events_for(&self, pid: &str) -> Vec<TimelineEvent> {
        self.events.iter().filter(|e| e.pid == pid).cloned().collect()
    }

    /// Total cycles `pid` spent in `state` (markers contribute nothing).
    pub fn cycles_in_state(&self, pid: &str, state: ProcessState) -> u64 {
        self.events
            .iter()
            .filter(|e| e.pid == pid && e.state == state)
            .map(|e| e.end_cycle - e.start_cycle)
            .sum()
    }

    /// How many spans (or markers) of `state` were recorded for `pid`.
    pub fn state_count(&self, pid: &str, state: ProcessState) -> usize {
        self.events
            .iter()
            .filter(|e| e.pid == pid && e.state == state)
            .count()
    }

    /// Pretty-print the trace for debugging.
    pub fn dump(&self) {
        for ev in &self.events {
            let tag = match ev.action {
                Some(a) => format!(" ({a:?})"),
                None => String::new(),
            };
            eprintln!(
                "[{:>4}..{:<4}] {:<10} {:?}{}",
                ev.start_cycle, ev.end_cycle, ev.pid, ev.state, tag
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_cycles_extend_one_span() {
        let mut t = Timeline::new();
        t.mark("P1", 0, ProcessState::New);
        t.record("P1", 0, ProcessState::Accessed, None, false);
        t.record("P1", 1, ProcessState::Accessed, None, false);
        t.record("P1", 2, ProcessState::Waiting, None, false);
        t.record("P1", 3, ProcessState::Accessed, None, false);
        let evs = t.events_for("P1");
        assert_eq!(evs.len(), 4, "marker + run + wait + run: {evs:?}");
        assert_eq!((evs[1].start_cycle, evs[1].end_cycle), (0, 2));
        assert_eq!((evs[2].start_cycle, evs[2].end_cycle), (2, 3));
        assert_eq!((evs[3].start_cycle, evs[3].end_cycle), (3, 4));
    }

    #[test]
    fn test_fresh_slice_opens_new_span() {
        let mut t = Timeline::new();
        t.record("P1", 0, ProcessState::Accessed, None, false);
        t.record("P1", 1, ProcessState::Accessed, None, false);
        t.record("P1", 2, ProcessState::Accessed, None, true);
        assert_eq!(t.state_count("P1", ProcessState::Accessed), 2);
        assert_eq!(t.cycles_in_state("P1", ProcessState::Accessed), 3);
    }

    #[test]
    fn test_gap_opens_new_span() {
        let mut t = Timeline::new();
        t.record("P1", 0, ProcessState::Accessed, None, false);
        t.record("P1", 2, ProcessState::Accessed, None, false);
        assert_eq!(t.state_count("P1", ProcessState::Accessed), 2);
    }

    #[test]
    fn test_interleaved_processes_coalesce_independently() {
        let mut t = Timeline::new();
        t.record("P1", 0, ProcessState::Accessed, None, false);
        t.record("P2", 0, ProcessState::Waiting, None, false);
        t.record("P1", 1, ProcessState::Accessed, None, false);
        t.record("P2", 1, ProcessState::Waiting, None, false);
        assert_eq!(t.state_count("P1", ProcessState::Accessed), 1);
        assert_eq!(t.state_count("P2", ProcessState::Waiting), 1);
        assert_eq!(t.cycles_in_state("P2", ProcessState::Waiting), 2);
    }

    #[test]
    fn test_action_tag_change_breaks_span() {
        let mut t = Timeline::new();
        t.record("P1", 0, ProcessState::Accessed, Some(ActionType::Read), false);
        t.record("P1", 1, ProcessState::Accessed, Some(ActionType::Write), false);
        assert_eq!(t.state_count("P1", ProcessState::Accessed), 2);
    }
}
