//! Configuration for a club run.
//!
//! Two layers of configuration exist:
//!
//! - [`ClubConfig`] -- the validated parameters of the simulated day (table
//!   count, opening hours, hourly rate). These come from the input header.
//! - [`Settings`] -- process settings loaded from `club-config.yaml`
//!   (log level, report format), with environment overrides.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use club_types::Clock;

/// Name of the optional settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "club-config.yaml";

/// Largest table count a club may be configured with.
pub const MAX_TABLES: u32 = 100_000;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The club must have at least one table.
    #[error("table count must be positive")]
    NoTables,

    /// More tables than [`MAX_TABLES`].
    #[error("table count {tables} exceeds the maximum of {max}")]
    TooManyTables {
        /// Requested table count.
        tables: u32,
        /// The limit.
        max: u32,
    },

    /// The hourly rate must be positive.
    #[error("hourly rate must be positive")]
    ZeroRate,

    /// Closing time is not strictly after opening time.
    #[error("closing time {close} must be after opening time {open}")]
    ClosesBeforeOpening {
        /// Configured opening time.
        open: Clock,
        /// Configured closing time.
        close: Clock,
    },

    /// Unknown report format name.
    #[error("unknown report format {value:?} (expected \"text\" or \"json\")")]
    UnknownFormat {
        /// The offending value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

// ---------------------------------------------------------------------------
// Club parameters
// ---------------------------------------------------------------------------

/// Immutable parameters of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClubConfig {
    tables: u32,
    open: Clock,
    close: Clock,
    hourly_rate: u64,
}

impl ClubConfig {
    /// Validate and build the day parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoTables`] for zero tables,
    /// [`ConfigError::TooManyTables`] above [`MAX_TABLES`],
    /// [`ConfigError::ZeroRate`] for a zero rate, and
    /// [`ConfigError::ClosesBeforeOpening`] unless `open < close`.
    pub fn new(tables: u32, open: Clock, close: Clock, hourly_rate: u64) -> Result<Self, ConfigError> {
        if tables == 0 {
            return Err(ConfigError::NoTables);
        }
        if tables > MAX_TABLES {
            return Err(ConfigError::TooManyTables {
                tables,
                max: MAX_TABLES,
            });
        }
        if hourly_rate == 0 {
            return Err(ConfigError::ZeroRate);
        }
        if close <= open {
            return Err(ConfigError::ClosesBeforeOpening { open, close });
        }
        Ok(Self {
            tables,
            open,
            close,
            hourly_rate,
        })
    }

    /// Number of tables.
    pub const fn tables(&self) -> u32 {
        self.tables
    }

    /// Opening time.
    pub const fn open(&self) -> Clock {
        self.open
    }

    /// Closing time.
    pub const fn close(&self) -> Clock {
        self.close
    }

    /// Price of one started hour at a table.
    pub const fn hourly_rate(&self) -> u64 {
        self.hourly_rate
    }

    /// Whether the club is open at `time`: `open <= time < close`.
    pub fn is_open_at(&self, time: Clock) -> bool {
        self.open <= time && time < self.close
    }
}

// ---------------------------------------------------------------------------
// Process settings
// ---------------------------------------------------------------------------

/// Process settings, mirroring the structure of `club-config.yaml`.
///
/// Every section is optional; missing values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Report output configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

impl Settings {
    /// Load settings from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `CLUB_LOG_LEVEL` overrides `logging.level`
    /// - `CLUB_REPORT_FORMAT` overrides `report.format`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::UnknownFormat`] for a bad `CLUB_REPORT_FORMAT`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut settings = Self::parse(&contents)?;
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Parse settings from a YAML string. No environment overrides apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from a variable lookup (normally the environment).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownFormat`] if `CLUB_REPORT_FORMAT` is set
    /// to an unknown format.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("CLUB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CLUB_REPORT_FORMAT") {
            self.report.format = format.parse()?;
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit log lines as JSON instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// How the day report is rendered on stdout.
    #[serde(default)]
    pub format: ReportFormat,
}

/// Rendering of the day report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One record per line, as in the input protocol.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

impl FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownFormat {
                value: s.to_owned(),
            }),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    fn at(s: &str) -> Clock {
        s.parse().unwrap()
    }

    #[test]
    fn club_config_validates_parameters() {
        assert!(ClubConfig::new(3, at("08:00"), at("20:00"), 10).is_ok());
        assert!(matches!(
            ClubConfig::new(0, at("08:00"), at("20:00"), 10),
            Err(ConfigError::NoTables)
        ));
        assert!(ClubConfig::new(MAX_TABLES, at("08:00"), at("20:00"), 10).is_ok());
        assert!(matches!(
            ClubConfig::new(MAX_TABLES + 1, at("08:00"), at("20:00"), 10),
            Err(ConfigError::TooManyTables { max: MAX_TABLES, .. })
        ));
        assert!(matches!(
            ClubConfig::new(3, at("08:00"), at("20:00"), 0),
            Err(ConfigError::ZeroRate)
        ));
        assert!(matches!(
            ClubConfig::new(3, at("20:00"), at("20:00"), 10),
            Err(ConfigError::ClosesBeforeOpening { .. })
        ));
        assert!(matches!(
            ClubConfig::new(3, at("20:00"), at("08:00"), 10),
            Err(ConfigError::ClosesBeforeOpening { .. })
        ));
    }

    #[test]
    fn open_hours_are_half_open() {
        let config = ClubConfig::new(3, at("08:00"), at("20:00"), 10).unwrap();
        assert!(config.is_open_at(at("08:00")));
        assert!(config.is_open_at(at("10:00")));
        assert!(config.is_open_at(at("19:59")));
        assert!(!config.is_open_at(at("07:59")));
        assert!(!config.is_open_at(at("20:00")));
        assert!(!config.is_open_at(at("20:01")));
    }

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.logging.level, "info");
        assert!(!settings.logging.json);
        assert_eq!(settings.report.format, ReportFormat::Text);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
logging:
  level: debug
  json: true

report:
  format: json
";
        let settings = Settings::parse(yaml).unwrap();
        assert_eq!(settings.logging.level, "debug");
        assert!(settings.logging.json);
        assert_eq!(settings.report.format, ReportFormat::Json);
    }

    #[test]
    fn parse_partial_and_empty_yaml() {
        let settings = Settings::parse("report:\n  format: text\n").unwrap();
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.report.format, ReportFormat::Text);

        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn rejects_unknown_format_in_yaml() {
        assert!(matches!(
            Settings::parse("report:\n  format: xml\n"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn overrides_replace_yaml_values() {
        let mut settings = Settings::default();
        settings
            .apply_overrides(|key| match key {
                "CLUB_LOG_LEVEL" => Some("trace".to_owned()),
                "CLUB_REPORT_FORMAT" => Some("JSON".to_owned()),
                _ => None,
            })
            .unwrap();
        assert_eq!(settings.logging.level, "trace");
        assert_eq!(settings.report.format, ReportFormat::Json);

        let result = settings.apply_overrides(|key| {
            (key == "CLUB_REPORT_FORMAT").then(|| "pdf".to_owned())
        });
        assert!(matches!(result, Err(ConfigError::UnknownFormat { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Settings::from_file(Path::new("does/not/exist.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
