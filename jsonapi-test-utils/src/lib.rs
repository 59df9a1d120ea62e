//! JSON:API Codec Test Utilities
//!
//! This crate provides shared fakes, fixtures and logging setup for the
//! codec's integration tests.

use std::sync::Once;

pub mod fakes;
pub mod fixtures;

pub use fakes::{
    AlwaysRootResolver, ClassifyingConverter, CountingConverter, FailingConverter,
    RecordingContext, RecordingResolver,
};
pub use fixtures::{identifiers, DocumentBuilder};

static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per process
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
