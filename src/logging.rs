//! Logging setup for the command line tool
//!
//! Logs go to stderr unless a log file is given, so stdout stays valid JSON.
//! The filter comes from `RUST_LOG` and defaults to warnings only.

use std::path::Path;

use anyhow::{Context, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, fmt::writer::BoxMakeWriter, prelude::*};

/// Filter used when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "laravel_registry=warn";

/// Emit JSON log lines when this variable is set
const LOG_JSON_ENV: &str = "LARAVEL_REGISTRY_LOG_JSON";

/// Initialize the tracing subscriber.
///
/// The returned guard flushes the log file on drop and must be kept alive
/// until the program exits.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (writer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let subscriber = tracing_subscriber::registry().with(filter);

    if std::env::var(LOG_JSON_ENV).is_ok() {
        let json_layer = fmt::layer().json().with_target(true).with_writer(writer);

        subscriber.with(json_layer).try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_ansi(log_file.is_none())
            .with_writer(writer);

        subscriber.with(fmt_layer).try_init()?;
    }

    Ok(guard)
}
