//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Timing of the slot machine, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    /// How long a draw spins before its number is decided.
    #[serde(default = "default_spin_ms")]
    pub spin_ms: u64,
    /// Interval between cosmetic number changes while spinning.
    #[serde(default = "default_roll_interval_ms")]
    pub roll_interval_ms: u64,
    /// Pause between draws of an auto sequence.
    #[serde(default = "default_auto_delay_ms")]
    pub auto_delay_ms: u64,
    /// How long the winning number stays highlighted.
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
}

impl DrawConfig {
    pub fn spin(&self) -> Duration {
        Duration::from_millis(self.spin_ms)
    }

    pub fn roll_interval(&self) -> Duration {
        Duration::from_millis(self.roll_interval_ms.max(1))
    }

    pub fn auto_delay(&self) -> Duration {
        Duration::from_millis(self.auto_delay_ms)
    }

    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            spin_ms: default_spin_ms(),
            roll_interval_ms: default_roll_interval_ms(),
            auto_delay_ms: default_auto_delay_ms(),
            highlight_ms: default_highlight_ms(),
        }
    }
}

/// Bulk-entry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Bounds used by `/range` without arguments.
    #[serde(default = "default_range_start")]
    pub range_start: i64,
    #[serde(default = "default_range_end")]
    pub range_end: i64,
    /// Largest span a single `/range` may add.
    #[serde(default = "default_max_range_len")]
    pub max_range_len: u64,
    #[serde(default = "default_max_import_bytes")]
    pub max_import_bytes: u64,
    /// Where `/template` writes when no directory is given.
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            range_start: default_range_start(),
            range_end: default_range_end(),
            max_range_len: default_max_range_len(),
            max_import_bytes: default_max_import_bytes(),
            export_dir: default_export_dir(),
        }
    }
}

/// UI appearance and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,
    #[serde(default = "default_true")]
    pub confirm_reset: bool,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            grid_columns: default_grid_columns(),
            confirm_reset: true,
            timestamp_format: default_timestamp_format(),
        }
    }
}

/// Draw history and diagnostic logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Filter for the diagnostic log, e.g. `"info"` or `"luckydraw=debug"`.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            level: default_level(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_spin_ms() -> u64 {
    2000
}
fn default_roll_interval_ms() -> u64 {
    100
}
fn default_auto_delay_ms() -> u64 {
    1500
}
fn default_highlight_ms() -> u64 {
    2000
}
fn default_range_start() -> i64 {
    1
}
fn default_range_end() -> i64 {
    1000
}
fn default_max_range_len() -> u64 {
    crate::engine::DEFAULT_MAX_RANGE_LEN
}
fn default_max_import_bytes() -> u64 {
    10 * 1024 * 1024 // 10 MB
}
fn default_export_dir() -> String {
    ".".to_string()
}
fn default_page_size() -> usize {
    crate::engine::pager::DEFAULT_PAGE_SIZE
}
fn default_grid_columns() -> usize {
    10
}
fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_log_dir() -> String {
    "~/.local/share/luckydraw/logs".to_string()
}
fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.draw.spin_ms, 2000);
        assert_eq!(cfg.draw.auto_delay_ms, 1500);
        assert_eq!(cfg.pool.range_start, 1);
        assert_eq!(cfg.pool.range_end, 1000);
        assert_eq!(cfg.pool.max_range_len, 100_000);
        assert_eq!(cfg.ui.page_size, 100);
        assert!(cfg.ui.confirm_reset);
        assert!(!cfg.logging.enabled);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [draw]
            spin_ms = 500

            [ui]
            confirm_reset = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.draw.spin_ms, 500);
        assert_eq!(cfg.draw.roll_interval_ms, 100);
        assert!(!cfg.ui.confirm_reset);
        assert_eq!(cfg.ui.grid_columns, 10);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let cfg = AppConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.pool.max_import_bytes, cfg.pool.max_import_bytes);
        assert_eq!(back.logging.log_dir, cfg.logging.log_dir);
    }

    #[test]
    fn test_zero_roll_interval_is_clamped() {
        let cfg = DrawConfig { roll_interval_ms: 0, ..DrawConfig::default() };
        assert_eq!(cfg.roll_interval(), Duration::from_millis(1));
    }
}
