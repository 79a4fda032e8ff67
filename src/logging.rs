//! Installs the global `tracing` subscriber.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Where log lines may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// The terminal is owned by the UI: log only to the configured file.
    FileOnly,
    /// Headless runs: the configured file, or stderr without one.
    FileOrStderr,
}

/// Build the filter: `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&config.level)?),
    }
}

/// Install the subscriber. Returns `false` when nothing was installed
/// because the sink had nowhere to write.
pub fn init(config: &LoggingConfig, sink: LogSink) -> Result<bool, LoggingError> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match (&config.file, sink) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::FileOpen {
                    path: path.clone(),
                    source: e,
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, LogSink::FileOrStderr) => builder.with_writer(std::io::stderr).try_init(),
        (None, LogSink::FileOnly) => return Ok(false),
    };

    installed.map_err(|e| LoggingError::Install(e.to_string()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_without_file_installs_nothing() {
        let config = LoggingConfig::default();
        assert!(!init(&config, LogSink::FileOnly).unwrap());
    }

    #[test]
    fn test_unopenable_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            level: "info".to_string(),
            // a directory cannot be opened for appending
            file: Some(dir.path().to_path_buf()),
        };
        assert!(matches!(
            init(&config, LogSink::FileOnly),
            Err(LoggingError::FileOpen { .. })
        ));
    }
}
