use tracing_subscriber::EnvFilter;

pub struct EnvVars;

impl EnvVars {
    /// Filter directives for test logs, for example `MSW_LOG=msw=trace`.
    pub const MSW_LOG: &'static str = "MSW_LOG";
}

/// Routes `tracing` events to the test harness output.
///
/// Only the first call per process installs the subscriber.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_env(EnvVars::MSW_LOG)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init();
}
