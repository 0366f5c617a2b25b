//! Shared test setup.

/// Initialize tracing from `RUST_LOG` so a failing run can be replayed
/// with full engine logs (`RUST_LOG=schedsim=debug cargo test ...`).
/// `try_init()` is idempotent: the first call in the process wins and
/// later calls are silently ignored.
pub fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
