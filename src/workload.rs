//! Workload definition and builder API.
//!
//! A [`Workload`] is everything a run consumes: process records and, for
//! synchronization runs, resources and scheduled actions. The builder
//! validates at build time — duplicate identities, zero bursts, and
//! dangling action references are caller errors surfaced before any
//! simulation starts.

use std::collections::BTreeSet;

use anyhow::bail;
use anyhow::Result;

use crate::process::Process;
use crate::resource::Action;
use crate::resource::ActionType;
use crate::resource::Resource;
use crate::types::Cycle;

/// A validated set of inputs for one simulation run.
#[derive(Debug, Clone, Default)]
pub struct Workload {
    pub processes: Vec<Process>,
    pub resources: Vec<Resource>,
    pub actions: Vec<Action>,
}

impl Workload {
    pub fn builder() -> WorkloadBuilder {
        WorkloadBuilder {
            processes: Vec::new(),
            resources: Vec::new(),
            actions: Vec::new(),
        }
    }
}

/// Builder for constructing workloads.
pub struct WorkloadBuilder {
    processes: Vec<(String, u64, Cycle, u32)>,
    resources: Vec<(String, u64)>,
    actions: Vec<Action>,
}

impl WorkloadBuilder {
    /// Add a process: identity, requested work, arrival cycle, priority
    /// (lower value = higher priority).
    pub fn process(mut self, pid: &str, burst: u64, arrival: Cycle, priority: u32) -> Self {
        self.processes
            .push((pid.to_string(), burst, arrival, priority));
        self
    }

    /// Add a named resource with the given number of units. The unit count
    /// only matters under semaphore arbitration; a mutex ignores it.
    pub fn resource(mut self, name: &str, count: u64) -> Self {
        self.resources.push((name.to_string(), count));
        self
    }

    /// Schedule an access intent for a process at a cycle.
    pub fn action(mut self, pid: &str, kind: ActionType, resource: &str, cycle: Cycle) -> Self {
        self.actions.push(Action::new(pid, kind, resource, cycle));
        self
    }

    /// Validate and build the workload.
    pub fn build(self) -> Result<Workload> {
        let mut processes = Vec::with_capacity(self.processes.len());
        let mut pids = BTreeSet::new();
        for (pid, burst, arrival, priority) in self.processes {
            if !pids.insert(pid.clone()) {
                bail!("duplicate process pid {:?}", pid);
            }
            processes.push(Process::new(pid, burst, arrival, priority)?);
        }

        let mut resources = Vec::with_capacity(self.resources.len());
        let mut names = BTreeSet::new();
        for (name, count) in self.resources {
            if !names.insert(name.clone()) {
                bail!("duplicate resource name {:?}", name);
            }
            resources.push(Resource::new(name, count));
        }

        for action in &self.actions {
            if !pids.contains(&action.pid) {
                bail!("action references unknown process {:?}", action.pid);
            }
            if !names.contains(&action.resource) {
                bail!("action references unknown resource {:?}", action.resource);
            }
        }

        Ok(Workload {
            processes,
            resources,
            actions: self.actions,
        })
    }
}
