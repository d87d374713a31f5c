//! Draw history and diagnostic logging to disk.
//!
//! When enabled, every resolved draw is appended to a daily history file
//! (`draws_<date>.log`) in the configured log directory (default:
//! `~/.local/share/luckydraw/logs/`). Diagnostic `tracing` output goes to
//! `luckydraw.log` in the same directory, never to the terminal the UI owns.

use crate::config::LoggingConfig;
use crate::files::expand_home;
use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. No-op when logging is disabled.
/// `RUST_LOG` overrides the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }
    let log_dir = expand_home(&config.log_dir);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let path = log_dir.join("luckydraw.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;
    Ok(())
}

/// Appends drawn numbers to daily history files.
///
/// File handles are cached for the lifetime of the logger to avoid repeated
/// opens. A file that cannot be opened is skipped with a warning.
pub struct DrawLogger {
    enabled: bool,
    log_dir: PathBuf,
    timestamp_format: String,
    file_handles: HashMap<String, fs::File>,
}

impl DrawLogger {
    pub fn new(config: &LoggingConfig, timestamp_format: &str) -> Self {
        Self {
            enabled: config.enabled,
            log_dir: expand_home(&config.log_dir),
            timestamp_format: timestamp_format.to_string(),
            file_handles: HashMap::new(),
        }
    }

    pub fn log_draw(&mut self, ordinal: usize, value: i64) {
        let line = format!("#{} {}", ordinal, value);
        self.write_line(&line);
    }

    pub fn log_reset(&mut self) {
        self.write_line("--- reset ---");
    }

    fn write_line(&mut self, text: &str) {
        if !self.enabled {
            return;
        }

        let now = chrono::Local::now();
        let filename = format!("draws_{}.log", now.format("%Y-%m-%d"));
        let line = format!("[{}] {}", now.format(&self.timestamp_format), text);

        if !self.file_handles.contains_key(&filename) {
            let _ = fs::create_dir_all(&self.log_dir);
            let filepath = self.log_dir.join(&filename);
            match OpenOptions::new().create(true).append(true).open(&filepath) {
                Ok(file) => {
                    self.file_handles.insert(filename.clone(), file);
                }
                Err(e) => {
                    tracing::warn!(path = %filepath.display(), error = %e, "cannot open draw log");
                    return;
                }
            }
        }

        if let Some(handle) = self.file_handles.get_mut(&filename) {
            let _ = writeln!(handle, "{}", line);
        }
    }
}
