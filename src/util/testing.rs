//! Test support: one global tracing subscriber for all tests

use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Install the test subscriber once per test binary.
///
/// Output goes through libtest's capture, so it only shows for failing tests
/// (or with `--nocapture`). `RUST_LOG` overrides the default filter.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,balena_wrap=trace"));

        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter);

        if tracing::dispatcher::has_been_set() {
            return;
        }
        if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("Error: Failed to set up test logging: {}", e);
        }
        tracing::debug!("test logging ready");
    });
}
