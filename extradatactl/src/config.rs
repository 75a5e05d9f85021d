use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::prelude::*;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/extradatactl/config.toml";
const MIN_PREVIEW_WIDTH: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Failed to setup logging: {0}")]
    LoggingSetup(tracing_appender::rolling::InitError),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    #[must_use]
    pub const fn to_rotation(self) -> Rotation {
        match self {
            Self::Hourly => Rotation::HOURLY,
            Self::Daily => Rotation::DAILY,
            Self::Never => Rotation::NEVER,
        }
    }
}

/// Format of the log file. The terminal always gets plain text on stderr.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_max_log_files() -> usize {
    7
}

const fn default_pretty() -> bool {
    true
}

const fn default_preview_width() -> usize {
    48
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Logging {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub rotation: LogRotation,
    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            dir: None,
            rotation: LogRotation::default(),
            max_log_files: default_max_log_files(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Output {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default = "default_preview_width")]
    pub preview_width: usize,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            preview_width: default_preview_width(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub output: Output,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::Io)?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;
        Ok(config)
    }

    /// An explicit path must exist. Without one, the system-wide file is used
    /// when present and built-in defaults otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if LevelFilter::from_str(&self.logging.level).is_err() {
            return Err(ConfigError::Validation(format!(
                "unknown log level '{}' (expected off, error, warn, info, debug or trace)",
                self.logging.level
            )));
        }
        if self.logging.max_log_files == 0 {
            return Err(ConfigError::Validation(
                "logging.max_log_files must be at least 1".to_string(),
            ));
        }
        if self.output.preview_width < MIN_PREVIEW_WIDTH {
            return Err(ConfigError::Validation(format!(
                "output.preview_width must be at least {MIN_PREVIEW_WIDTH}"
            )));
        }
        Ok(())
    }

    /// `RUST_LOG` takes precedence over the configured level.
    pub fn init_logger(&self) -> Result<Option<WorkerGuard>, ConfigError> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        let registry = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_fmt::layer().with_writer(io::stderr));

        let Some(dir) = &self.logging.dir else {
            registry.init();
            return Ok(None);
        };

        let file_appender = Builder::new()
            .rotation(self.logging.rotation.to_rotation())
            .filename_prefix("extradatactl")
            .filename_suffix("log")
            .max_log_files(self.logging.max_log_files)
            .build(dir)
            .map_err(ConfigError::LoggingSetup)?;
        let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);

        match self.logging.format {
            LogFormat::Text => {
                registry
                    .with(tracing_fmt::layer().with_ansi(false).with_writer(file_nb))
                    .init();
            }
            LogFormat::Json => {
                registry
                    .with(tracing_fmt::layer().json().with_writer(file_nb))
                    .init();
            }
        }

        Ok(Some(file_guard))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.logging.dir.is_none());
        assert_eq!(config.logging.max_log_files, 7);
        assert!(config.output.pretty);
        assert_eq!(config.output.preview_width, 48);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_empty_file_uses_defaults() {
        let temp_file = write_config("");
        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_full_file() {
        let temp_file = write_config(
            r#"
[logging]
level = "debug"
format = "json"
dir = "/var/log/extradatactl"
rotation = "hourly"
max_log_files = 3

[output]
pretty = false
preview_width = 80
"#,
        );

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.dir.as_deref(), Some("/var/log/extradatactl"));
        assert_eq!(config.logging.rotation, LogRotation::Hourly);
        assert_eq!(config.logging.max_log_files, 3);
        assert!(!config.output.pretty);
        assert_eq!(config.output.preview_width, 80);
    }

    #[test]
    fn test_config_shipped_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../configs/extradatactl.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_invalid_level() {
        let temp_file = write_config("[logging]\nlevel = \"loud\"\n");
        let err = Config::load(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("loud")));
    }

    #[test]
    fn test_config_zero_log_files() {
        let temp_file = write_config("[logging]\nmax_log_files = 0\n");
        assert!(matches!(
            Config::load(temp_file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_config_narrow_preview() {
        let temp_file = write_config("[output]\npreview_width = 2\n");
        assert!(matches!(
            Config::load(temp_file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_config_parse_error() {
        let temp_file = write_config("[logging\nlevel = ");
        assert!(matches!(
            Config::load(temp_file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            Config::resolve(Some(missing.as_path())),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let toml_string = toml::to_string(&config).unwrap();
        assert!(toml_string.contains("level = \"warn\""));
        let deserialized: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_log_rotation_mapping() {
        assert_eq!(LogRotation::Daily.to_rotation(), Rotation::DAILY);
        assert_eq!(LogRotation::Hourly.to_rotation(), Rotation::HOURLY);
        assert_eq!(LogRotation::Never.to_rotation(), Rotation::NEVER);
    }
}
