//! Tracing pipeline bootstrap.
//!
//! Installs the global `tracing` subscriber according to
//! [`TelemetrySettings`]: pretty output for local work, JSON for
//! machine-collected logs. `RUST_LOG` overrides the configured filter.

use tracing_subscriber::EnvFilter;

use folio_kernel::settings::{LogFormat, TelemetrySettings};

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init(settings: &TelemetrySettings) {
    let directives = settings.filter.clone().unwrap_or_else(|| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let installed = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .is_ok(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::debug!(format = ?settings.log_format, "telemetry initialized");
    }
}
