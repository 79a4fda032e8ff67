use std::path::PathBuf;

/// Why a drop was not applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is outside the board (0..{width})")]
    InvalidColumn { column: isize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("the game is already over")]
    GameAlreadyOver,
}

impl MoveError {
    /// Expected conditions the input layer ignores silently. `InvalidColumn`
    /// is a caller bug and is not one of them.
    pub fn is_rejection(&self) -> bool {
        matches!(self, MoveError::ColumnFull { .. } | MoveError::GameAlreadyOver)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimensionError {
    #[error("board size {width}x{height} out of range (each side must be 1..={max})", max = crate::game::MAX_DIMENSION)]
    OutOfRange { width: usize, height: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid board size: {0}")]
    Dimensions(#[from] DimensionError),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur while installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Errors from parsing a scripted move list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("move {index} ({token:?}) is not an integer column")]
    NotAColumn { index: usize, token: String },

    #[error("move list is empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::InvalidColumn {
            column: -1,
            width: 7,
        };
        assert_eq!(err.to_string(), "column -1 is outside the board (0..7)");
        assert_eq!(
            MoveError::ColumnFull { column: 3 }.to_string(),
            "column 3 is full"
        );
    }

    #[test]
    fn test_move_error_rejection() {
        assert!(MoveError::ColumnFull { column: 0 }.is_rejection());
        assert!(MoveError::GameAlreadyOver.is_rejection());
        assert!(!MoveError::InvalidColumn {
            column: 7,
            width: 7
        }
        .is_rejection());
    }

    #[test]
    fn test_dimension_error_display() {
        let err = DimensionError::OutOfRange {
            width: 0,
            height: 6,
        };
        assert_eq!(
            err.to_string(),
            "board size 0x6 out of range (each side must be 1..=12)"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("ui.animation_tick_ms must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: ui.animation_tick_ms must be > 0"
        );
    }

    #[test]
    fn test_script_error_display() {
        let err = ScriptError::NotAColumn {
            index: 2,
            token: "x".to_string(),
        };
        assert_eq!(err.to_string(), "move 2 (\"x\") is not an integer column");
    }
}
