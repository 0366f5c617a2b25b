//! Type aliases for domain quantities.
//!
//! The simulation advances in discrete cycles; there is no wall-clock time
//! anywhere in the core. An alias rather than a newtype keeps cycle
//! arithmetic (interval ends, waits, averages) free of wrapper boilerplate
//! while still documenting intent at API boundaries.

/// A point in simulated time, counted in CPU cycles from the start of a run.
pub type Cycle = u64;
