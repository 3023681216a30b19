//! Configuration loading for the carousel runtime.
//!
//! Configuration is loaded from a TOML file (default: `carousel.toml`).
//! Every field has a default, so an empty file is valid.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CarouselConfig {
    /// Transition timing.
    #[serde(default)]
    pub transition: TransitionConfig,
    /// Auto-advance timer.
    #[serde(default)]
    pub auto_advance: AutoAdvanceConfig,
    /// Startup behaviour.
    #[serde(default)]
    pub startup: StartupConfig,
}

/// Transition timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransitionConfig {
    /// Delay before a transition completes, in milliseconds (default: 300).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

/// Auto-advance timer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AutoAdvanceConfig {
    /// Start auto-advance when the carousel is created (default: false).
    #[serde(default)]
    pub enabled: bool,
    /// Interval between ticks in milliseconds (default: 5000).
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Offset issued on each tick (default: 1).
    #[serde(default = "default_step")]
    pub step: i64,
}

/// Startup behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartupConfig {
    /// Slide shown by the startup transition (default: 1).
    #[serde(default = "default_initial_slide")]
    pub initial_slide: i64,
    /// Run the startup transition at all (default: true).
    #[serde(default = "default_show_initial")]
    pub show_initial: bool,
}

// Default value functions
fn default_delay_ms() -> u64 {
    300
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_step() -> i64 {
    1
}

fn default_initial_slide() -> i64 {
    1
}

fn default_show_initial() -> bool {
    true
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

impl Default for AutoAdvanceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: default_interval_ms(),
            step: default_step(),
        }
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_slide: default_initial_slide(),
            show_initial: default_show_initial(),
        }
    }
}

impl CarouselConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Set the transition delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.transition.delay_ms = saturating_millis(delay);
        self
    }

    /// Set the auto-advance interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.auto_advance.interval_ms = saturating_millis(interval);
        self
    }

    /// Skip the startup transition.
    pub fn without_initial_transition(mut self) -> Self {
        self.startup.show_initial = false;
        self
    }

    /// Delay before a transition completes.
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition.delay_ms)
    }

    /// Auto-advance interval, never zero.
    pub fn auto_advance_interval(&self) -> Duration {
        Duration::from_millis(self.auto_advance.interval_ms.max(1))
    }
}

fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let config = CarouselConfig::default();
        assert_eq!(config.transition_delay(), Duration::from_millis(300));
        assert_eq!(config.auto_advance_interval(), Duration::from_millis(5000));
        assert!(!config.auto_advance.enabled);
        assert_eq!(config.auto_advance.step, 1);
        assert_eq!(config.startup.initial_slide, 1);
        assert!(config.startup.show_initial);
    }

    #[test]
    fn oversized_durations_saturate() {
        let config = CarouselConfig::default()
            .with_delay(Duration::MAX)
            .with_interval(Duration::from_millis(250));
        assert_eq!(config.transition.delay_ms, u64::MAX);
        assert_eq!(config.auto_advance.interval_ms, 250);
    }

    #[test]
    fn config_from_toml_string() {
        let toml = r#"
[transition]
delay_ms = 150

[auto_advance]
enabled = true
interval_ms = 2500
step = -1

[startup]
initial_slide = 3
show_initial = false
"#;

        let config: CarouselConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.transition.delay_ms, 150);
        assert!(config.auto_advance.enabled);
        assert_eq!(config.auto_advance.interval_ms, 2500);
        assert_eq!(config.auto_advance.step, -1);
        assert_eq!(config.startup.initial_slide, 3);
        assert!(!config.startup.show_initial);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: CarouselConfig = toml::from_str("").unwrap();
        assert_eq!(config, CarouselConfig::default());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let toml = r#"
[auto_advance]
enabled = true
"#;
        let config: CarouselConfig = toml::from_str(toml).unwrap();
        assert!(config.auto_advance.enabled);
        assert_eq!(config.auto_advance.interval_ms, 5000);
        assert_eq!(config.transition.delay_ms, 300);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = CarouselConfig::default().with_interval(Duration::ZERO);
        assert_eq!(config.auto_advance_interval(), Duration::from_millis(1));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[transition]\ndelay_ms = 42").unwrap();

        let config = CarouselConfig::from_file(file.path()).unwrap();
        assert_eq!(config.transition_delay(), Duration::from_millis(42));
    }

    #[test]
    fn from_file_reports_path_on_errors() {
        let missing = Path::new("/nonexistent/carousel.toml");
        let err = CarouselConfig::from_file(missing).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("/nonexistent/carousel.toml"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[transition]\ndelay_ms = \"soon\"").unwrap();
        let err = CarouselConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
