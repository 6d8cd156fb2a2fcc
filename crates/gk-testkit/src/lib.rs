//! Shared fixtures and scenario builders for testing the gate pipeline
//! end-to-end (§8). Not part of the admission core itself — this crate
//! exists so integration tests across `gk-drp` and `gk-gatekeeper` don't
//! each hand-roll the same `MarketState`/`PortfolioState`/`Signal` setup.

pub mod fixtures;
pub mod scenarios;

pub use fixtures::*;

/// Initialize a `tracing` subscriber for test binaries that want gate
/// pipeline diagnostics on stderr. Not called automatically — tests that
/// want it call this once at the top of `main`/the test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_test_writer()
        .try_init();
}
