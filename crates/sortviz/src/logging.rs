#![forbid(unsafe_code)]

//! Log setup.
//!
//! The visualizer owns the terminal, so logs only go to a file, and only
//! when one is requested.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Result, SortvizError};

/// Where and how to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    /// Destination file; logging is off when `None`.
    pub file: Option<PathBuf>,
    /// Filter directive, e.g. `info` or `sortviz_core=trace`.
    pub level: String,
    /// Emit JSON lines instead of plain text.
    pub json: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Parse the filter directive without installing anything.
pub fn filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| SortvizError::invalid(format!("--log-level {level:?}: {e}")))
}

/// Install the global subscriber described by `options`.
///
/// Returns `false` when logging is disabled.
pub fn init(options: &LogOptions) -> Result<bool> {
    let filter = filter(&options.level)?;
    let Some(path) = options.file.as_ref() else {
        return Ok(false);
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file));
    let installed = if options.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| SortvizError::logging(e.to_string()))?;
    tracing::info!(path = %path.display(), json = options.json, "logging initialized");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_levels_and_directives() {
        assert!(filter("debug").is_ok());
        assert!(filter("sortviz_core=trace,info").is_ok());
    }

    #[test]
    fn filter_rejects_garbage() {
        let err = filter("sortviz=verbose").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn no_file_means_disabled() {
        assert!(!init(&LogOptions::default()).unwrap());
    }

    #[test]
    fn file_logging_writes_json_lines_once() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let options = LogOptions {
            file: Some(file.path().to_path_buf()),
            level: "info".to_string(),
            json: true,
        };
        assert!(init(&options).unwrap());
        tracing::info!(target: "sortviz", "after init");

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert!(text.contains("logging initialized"), "{text}");
        assert!(text.contains("after init"), "{text}");
        assert!(text.lines().all(|line| line.starts_with('{')), "{text}");

        // The global subscriber can only be installed once.
        let err = init(&options).unwrap_err();
        assert!(matches!(err, SortvizError::Logging { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
