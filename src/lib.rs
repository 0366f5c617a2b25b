//! schedsim - Deterministic cycle-stepped simulator for CPU scheduling and
//! resource synchronization.
//!
//! The simulation advances one cycle at a time and is fully deterministic:
//! given the same workload and configuration it produces the same timeline,
//! the same final process states, and the same metrics. There is no
//! wall-clock time anywhere in the core; pacing and animation belong to
//! whatever consumes the event stream.
//!
//! # Architecture
//!
//! - **Engine**: one shared cycle loop (`sched`) drives any of the five
//!   scheduling policies through the [`Policy`] trait seam
//! - **Policies**: FIFO, SJF, SRT, Round Robin, and Priority, each a
//!   per-cycle answer to "who runs now?"
//! - **Synchronization**: a second engine (`sync`) arbitrates scheduled
//!   resource actions under mutex or semaphore discipline and detects lack
//!   of progress
//! - **Timeline**: the append-only span trace every engine emits
//! - **Export**: the single JSON-lines serialization boundary
//!
//! # Usage
//!
//! ```rust,no_run
//! # fn main() -> anyhow::Result<()> {
//! use schedsim::*;
//!
//! let mut workload = Workload::builder()
//!     .process("editor", 4, 0, 1)
//!     .process("compiler", 3, 2, 2)
//!     .build()?;
//!
//! let config = SchedConfig::new(SchedAlgorithm::RoundRobin).quantum(2);
//! let timeline = run_schedule(&mut workload.processes, &config)?;
//! timeline.dump();
//!
//! let metrics = compute_metrics(&workload.processes, MetricsScope::All);
//! println!("avg waiting: {}", metrics.avg_waiting);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod export;
pub mod fifo;
pub mod metrics;
pub mod priority;
pub mod process;
pub mod resource;
pub mod round_robin;
pub mod sched;
pub mod sjf;
pub mod srt;
pub mod sync;
pub mod timeline;
pub mod types;
pub mod workload;

// Re-export the main public types for convenience.
pub use config::{SchedAlgorithm, SchedConfig, SyncConfig};
pub use metrics::{compute_metrics, MetricsScope, SimMetrics};
pub use process::{Process, ProcessState};
pub use resource::{Action, ActionType, LockMode, Resource};
pub use sched::{run_schedule, Policy};
pub use sync::run_synchronization;
pub use timeline::{Timeline, TimelineEvent};
pub use types::Cycle;
pub use workload::Workload;
