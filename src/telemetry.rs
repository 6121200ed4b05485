//! Global tracing subscriber setup.

use std::any::type_name_of_val;
use std::sync::atomic::{AtomicBool, Ordering};

use log::LevelFilter;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::Layer, layer::SubscriberExt};

use crate::config::AppConfig;

/// Errors that can occur while initializing global telemetry.
#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("a global tracing subscriber is already installed: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
    #[error("another `log` logger is already installed: {0}")]
    LogBridge(#[from] log::SetLoggerError),
}

static TELEMETRY_INITIALIZED: AtomicBool = AtomicBool::new(false);

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn stderr_layer(format: &str) -> BoxedLayer {
    let layer = fmt::layer().with_writer(std::io::stderr);
    match format {
        "pretty" => layer.pretty().boxed(),
        "json" => layer.json().boxed(),
        _ => layer.compact().boxed(),
    }
}

/// Install the process-wide subscriber and the `log` bridge once.
///
/// Events go to stderr so stdout carries only command output. `RUST_LOG`
/// overrides the configured level. Calls after a successful one do nothing.
/// The `log` bridge is installed separately from the subscriber; a
/// `LogTracer` that is already in place counts as success.
pub fn init_tracing(config: &AppConfig) -> Result<(), TelemetryInitError> {
    if TELEMETRY_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Ok(());
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let subscriber = tracing_subscriber::registry()
        .with(stderr_layer(&config.log_format))
        .with(filter);

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        TELEMETRY_INITIALIZED.store(false, Ordering::SeqCst);
        return Err(err.into());
    }

    if let Err(err) = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init()
    {
        if !type_name_of_val(log::logger()).contains("LogTracer") {
            return Err(err.into());
        }
    }

    Ok(())
}
