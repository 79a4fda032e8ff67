use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;
use crate::game::{Dimensions, HEIGHT, WIDTH};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Board size, fixed for the life of a game.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

impl BoardConfig {
    pub fn dimensions(&self) -> Result<Dimensions, ConfigError> {
        Ok(Dimensions::new(self.width, self.height)?)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Milliseconds per row of the falling-piece animation.
    pub animation_tick_ms: u64,
    /// Column selected at startup; the middle column when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<usize>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            animation_tick_ms: 60,
            start_column: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `connect_four=debug`. `RUST_LOG`
    /// takes precedence.
    pub level: String,
    /// Log file for the terminal UI. Without one the UI logs nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The file at this path was missing.
    Defaults(PathBuf),
}

impl ConfigSource {
    /// Report the source. Config is read before the subscriber exists, so
    /// callers log this once `logging::init` has run.
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => {
                tracing::debug!(path = %path.display(), "loaded config");
            }
            ConfigSource::Defaults(path) => {
                tracing::warn!(path = %path.display(), "config file not found, using defaults");
            }
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist. The returned [`ConfigSource`] says which happened.
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if path.exists() {
            Ok((Self::load(path)?, ConfigSource::File(path.to_path_buf())))
        } else {
            Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())))
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = self.board.dimensions()?;

        if let Some(column) = self.ui.start_column {
            if column >= dimensions.width() {
                return Err(ConfigError::Validation(format!(
                    "ui.start_column must be < board.width ({})",
                    dimensions.width()
                )));
            }
        }
        if self.ui.animation_tick_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.animation_tick_ms must be > 0".into(),
            ));
        }
        if self.ui.animation_tick_ms > 1000 {
            return Err(ConfigError::Validation(
                "ui.animation_tick_ms must be <= 1000".into(),
            ));
        }

        if EnvFilter::try_new(&self.logging.level).is_err() {
            return Err(ConfigError::Validation(format!(
                "logging.level {:?} is not a valid filter",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.board.dimensions().unwrap(), Dimensions::STANDARD);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
width = 9
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.width, 9);
        assert_eq!(config.board.height, HEIGHT);
        assert_eq!(config.ui.animation_tick_ms, 60);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_width() {
        let mut config = AppConfig::default();
        config.board.width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Dimensions(_))
        ));
    }

    #[test]
    fn test_validation_rejects_oversized_board() {
        let mut config = AppConfig::default();
        config.board.height = 40;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_start_column_off_board() {
        let mut config = AppConfig::default();
        config.ui.start_column = Some(WIDTH);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
        config.ui.start_column = Some(WIDTH - 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_tick_out_of_range() {
        let mut config = AppConfig::default();
        config.ui.animation_tick_ms = 0;
        assert!(config.validate().is_err());
        config.ui.animation_tick_ms = 5000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "connect_four=loud".to_string();
        assert!(config.validate().is_err());
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = Path::new("nonexistent_config.toml");
        let (config, source) = AppConfig::load_or_default(path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(source, ConfigSource::Defaults(path.to_path_buf()));
    }

    #[test]
    fn test_missing_file_warning_is_logged() {
        let (_, source) = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        let logs = capture_logs(|| source.log());
        assert!(logs.contains("WARN"));
        assert!(logs.contains("config file not found, using defaults"));
        assert!(logs.contains("nonexistent_config.toml"));
    }

    #[test]
    fn test_loaded_file_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("present.toml");
        std::fs::write(&path, "[board]\nwidth = 8\n").unwrap();

        let (config, source) = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(config.board.width, 8);
        assert_eq!(source, ConfigSource::File(path.clone()));

        let logs = capture_logs(|| source.log());
        assert!(logs.contains("loaded config"));
        assert!(!logs.contains("WARN"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[board]
width = 5
height = 4

[logging]
file = "game.log"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(
            config.board.dimensions().unwrap(),
            Dimensions::new(5, 4).unwrap()
        );
        assert_eq!(config.logging.file, Some(PathBuf::from("game.log")));
        // Others are defaults
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[board]\nwidth = 0\n").unwrap();
        assert!(AppConfig::load(&path).is_err());

        std::fs::write(&path, "[board\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }
}
