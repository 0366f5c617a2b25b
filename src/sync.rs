//! The resource-synchronization engine.
//!
//! A cycle-stepped loop over processes, resources, and scheduled actions:
//! each cycle every live process's earliest pending action is arbitrated
//! against its resource under the run's [`LockMode`], grants hold for
//! exactly one cycle, and a denied action stays pending for retry. The loop
//! additionally watches for lack of progress and omits processes that can
//! no longer advance.
//!
//! Stall detection is a liveness heuristic, not deadlock detection: it
//! infers a stall purely from "`stall_threshold` consecutive cycles in
//! which nobody was granted anything while somebody was denied", which is
//! conservative and can fire on long contention chains.

use std::collections::BTreeMap;

use anyhow::bail;
use anyhow::Result;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::SyncConfig;
use crate::process::Process;
use crate::process::ProcessState;
use crate::resource::Action;
use crate::resource::Resource;
use crate::timeline::Timeline;
use crate::types::Cycle;

/// Run a full synchronization simulation. Process records are mutated in
/// place; resources are restored to their idle state between cycles (holds
/// never carry over). The returned timeline tags resource events with the
/// action type that produced them.
///
/// Every action must reference a known process and resource; dangling
/// references are rejected before the loop starts, since an action that can
/// never be served would starve the retry semantics.
pub fn run_synchronization(
    procs: &mut [Process],
    resources: &mut [Resource],
    actions: &[Action],
    config: &SyncConfig,
) -> Result<Timeline> {
    config.validate()?;

    let pid_index: BTreeMap<&str, usize> = procs
        .iter()
        .enumerate()
        .map(|(i, p)| (p.pid.as_str(), i))
        .collect();
    let res_index: BTreeMap<&str, usize> = resources
        .iter()
        .enumerate()
        .map(|(i, r)| (r.name.as_str(), i))
        .collect();

    // Per-process action queues, ordered by scheduled cycle (stable on the
    // input order for equal cycles), and each action's resource resolved to
    // an index up front so the loop never touches the name maps.
    let mut pending: Vec<Vec<usize>> = vec![Vec::new(); procs.len()];
    let mut resource_of: Vec<usize> = Vec::with_capacity(actions.len());
    for (j, action) in actions.iter().enumerate() {
        let Some(&i) = pid_index.get(action.pid.as_str()) else {
            bail!("action references unknown process {:?}", action.pid);
        };
        let Some(&r) = res_index.get(action.resource.as_str()) else {
            bail!("action references unknown resource {:?}", action.resource);
        };
        pending[i].push(j);
        resource_of.push(r);
    }
    for queue in pending.iter_mut() {
        queue.sort_by_key(|&j| (actions[j].cycle, j));
    }

    info!(
        nr_procs = procs.len(),
        nr_resources = resources.len(),
        nr_actions = actions.len(),
        mode = ?config.mode,
        "starting synchronization run"
    );

    let mut timeline = Timeline::new();
    let total = procs.len();
    if total == 0 {
        return Ok(timeline);
    }

    let mut consumed = vec![false; actions.len()];
    let mut last_grant: Vec<Option<Cycle>> = vec![None; total];
    let mut done = 0usize;
    let mut cycle: Cycle = 0;
    // Consecutive cycles in which nothing was granted but something was
    // denied.
    let mut fruitless: u64 = 0;

    while done < total {
        for p in procs.iter_mut() {
            if p.arrival == cycle && p.state == ProcessState::New {
                timeline.mark(&p.pid, cycle, ProcessState::New);
                p.state = ProcessState::Waiting;
            }
        }

        // Arbitrate at most one action per live process per cycle.
        let mut grants: Vec<usize> = Vec::new();
        let mut denials = 0u64;
        for i in 0..total {
            if procs[i].state.is_terminal() || procs[i].arrival > cycle {
                continue;
            }
            let Some(&j) = pending[i]
                .iter()
                .find(|&&j| !consumed[j] && actions[j].cycle <= cycle)
            else {
                continue;
            };
            let action = &actions[j];
            let r = resource_of[j];
            let p = &mut procs[i];
            if config.mode.acquire(&mut resources[r]) {
                grants.push(r);
                consumed[j] = true;
                p.state = ProcessState::Accessed;
                p.remaining = p.remaining.saturating_sub(1);
                if p.start.is_none() {
                    p.start = Some(cycle);
                }
                last_grant[i] = Some(cycle);
                timeline.record(&p.pid, cycle, ProcessState::Accessed, Some(action.kind), false);
                debug!(cycle, pid = %p.pid, resource = %action.resource, "granted");
            } else {
                denials += 1;
                p.state = ProcessState::Waiting;
                p.waited += 1;
                timeline.record(&p.pid, cycle, ProcessState::Waiting, Some(action.kind), false);
                debug!(cycle, pid = %p.pid, resource = %action.resource, "denied");
            }
        }

        // Every hold lasts exactly one cycle; one release per grant keeps
        // semaphore counters balanced under multiple same-cycle grants.
        for &r in &grants {
            config.mode.release(&mut resources[r]);
        }

        // Natural completion.
        for (i, p) in procs.iter_mut().enumerate() {
            if !p.state.is_terminal() && p.remaining == 0 {
                let finish = last_grant[i].map_or(cycle + 1, |c| c + 1);
                p.state = ProcessState::Terminated;
                p.finish = Some(finish);
                timeline.mark(&p.pid, finish, ProcessState::Terminated);
                debug!(cycle, pid = %p.pid, finish, "terminated");
                done += 1;
            }
        }

        // Stall detection.
        if grants.is_empty() && denials > 0 {
            fruitless += 1;
            if fruitless >= config.stall_threshold {
                warn!(
                    cycle,
                    fruitless, "no progress; omitting processes that cannot proceed"
                );
                for p in procs.iter_mut() {
                    if p.state.is_terminal() || p.arrival > cycle || p.waited == 0 {
                        continue;
                    }
                    p.state = ProcessState::Omitted;
                    p.finish = Some(cycle);
                    timeline.mark(&p.pid, cycle, ProcessState::Omitted);
                }
                break;
            }
        } else if !grants.is_empty() {
            fruitless = 0;
        }

        // A live process with work left but nothing scheduled can never
        // finish naturally; omit it rather than let it linger.
        for (i, p) in procs.iter_mut().enumerate() {
            if p.state.is_terminal() || p.arrival > cycle {
                continue;
            }
            if !pending[i].iter().any(|&j| !consumed[j]) {
                p.state = ProcessState::Omitted;
                p.finish = Some(cycle);
                timeline.mark(&p.pid, cycle, ProcessState::Omitted);
                debug!(cycle, pid = %p.pid, remaining = p.remaining, "omitted, no pending actions");
                done += 1;
            }
        }

        cycle += 1;
    }

    let leftover = consumed.iter().filter(|&&c| !c).count();
    if leftover > 0 {
        debug!(leftover, "actions left unconsumed at end of run");
    }

    Ok(timeline)
}
