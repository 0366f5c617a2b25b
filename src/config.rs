//! Run configuration: algorithm selection and engine parameters.
//!
//! Configuration errors are surfaced here, before any simulation starts
//! (unknown algorithm names fail in `FromStr`, bad parameter combinations
//! fail in `validate`). The engines assume a validated configuration.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;

use crate::metrics::MetricsScope;
use crate::resource::LockMode;

/// The scheduling policy families the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedAlgorithm {
    Fifo,
    Sjf,
    Srt,
    RoundRobin,
    Priority,
}

impl FromStr for SchedAlgorithm {
    type Err = anyhow::Error;

    /// Accepts both the short config tokens (`RR`, `PS`) and the canonical
    /// long names.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "FIFO" => Ok(SchedAlgorithm::Fifo),
            "SJF" => Ok(SchedAlgorithm::Sjf),
            "SRT" => Ok(SchedAlgorithm::Srt),
            "RR" | "ROUND_ROBIN" => Ok(SchedAlgorithm::RoundRobin),
            "PS" | "PRIORITY" => Ok(SchedAlgorithm::Priority),
            other => Err(anyhow!("unknown scheduling algorithm: {other:?}")),
        }
    }
}

impl fmt::Display for SchedAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchedAlgorithm::Fifo => "FIFO",
            SchedAlgorithm::Sjf => "SJF",
            SchedAlgorithm::Srt => "SRT",
            SchedAlgorithm::RoundRobin => "ROUND_ROBIN",
            SchedAlgorithm::Priority => "PRIORITY",
        };
        f.write_str(name)
    }
}

/// Parameters for a scheduling run.
#[derive(Debug, Clone)]
pub struct SchedConfig {
    pub algorithm: SchedAlgorithm,
    /// Maximum contiguous cycles Round Robin grants per turn. Ignored by
    /// the other policies.
    pub quantum: u64,
    /// Whether Priority may interrupt a running process. Ignored by the
    /// other policies (FIFO/SJF are inherently non-preemptive, SRT
    /// inherently preemptive).
    pub preemptive: bool,
}

impl SchedConfig {
    pub fn new(algorithm: SchedAlgorithm) -> Self {
        SchedConfig {
            algorithm,
            quantum: 0,
            preemptive: false,
        }
    }

    pub fn quantum(mut self, quantum: u64) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn preemptive(mut self, preemptive: bool) -> Self {
        self.preemptive = preemptive;
        self
    }

    /// Reject parameter combinations that cannot make progress.
    pub fn validate(&self) -> Result<()> {
        if self.algorithm == SchedAlgorithm::RoundRobin && self.quantum == 0 {
            bail!("round robin requires a quantum of at least 1");
        }
        Ok(())
    }
}

/// Parameters for a synchronization run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// The lock discipline for every resource in the run.
    pub mode: LockMode,
    /// Consecutive cycles without a single grant (while some process is
    /// being denied) tolerated before the run is declared stalled. This is
    /// a liveness heuristic, not deadlock detection: a value of 1 treats
    /// any fruitless cycle as terminal.
    pub stall_threshold: u64,
    /// Whether omitted processes count toward the averages.
    pub metrics_scope: MetricsScope,
}

impl SyncConfig {
    pub const DEFAULT_STALL_THRESHOLD: u64 = 20;

    pub fn new(mode: LockMode) -> Self {
        SyncConfig {
            mode,
            stall_threshold: Self::DEFAULT_STALL_THRESHOLD,
            metrics_scope: MetricsScope::All,
        }
    }

    pub fn stall_threshold(mut self, cycles: u64) -> Self {
        self.stall_threshold = cycles;
        self
    }

    pub fn metrics_scope(mut self, scope: MetricsScope) -> Self {
        self.metrics_scope = scope;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.stall_threshold == 0 {
            bail!("stall threshold must be at least 1");
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig::new(LockMode::Mutex)
    }
}
