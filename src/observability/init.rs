//! Subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::file_writer::RotatingFile;
use super::tracer::file_tracer_provider;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;

pub const LOG_FILE_NAME: &str = "gcal-tui.log";
pub const TRACE_FILE_NAME: &str = "gcal-tui-otlp.json";

/// Installs the global subscriber: a plain-text log file, plus an OTLP/JSON
/// span file when `config.otlp_traces` is set.
///
/// The filter comes from `RUST_LOG` when it parses, else `config.trace_level`,
/// else `"info"`. Nothing is written to the terminal. If the data directory
/// cannot be created no subscriber is installed. Calling this twice keeps the
/// first subscriber.
///
/// # Example
///
/// ```rust,no_run
/// use gcal_tui::observability::init_tracing;
/// use gcal_tui::Config;
///
/// init_tracing(&Config::default());
/// tracing::info!("started");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(RotatingFile::new(data_dir.join(LOG_FILE_NAME)));

    let otel_layer = config.otlp_traces.then(|| {
        let resource = Resource::new(vec![
            KeyValue::new("service.name", "gcal-tui"),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]);
        let provider = file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
        OpenTelemetryLayer::new(provider.tracer("gcal-tui"))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(log_layer)
        .with(otel_layer)
        .try_init();
}
