use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Catalog file '{}' not found at expected path: {}", file_name(path), path.display())]
    MissingSource { path: PathBuf },

    #[error("Could not decode JSON from '{}': {source}", file_name(path))]
    MalformedSource {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
        preview: String,
    },

    #[error("Catalog schema error in '{}': {message}", file_name(path))]
    Schema { path: PathBuf, message: String },

    #[error("Catalog '{}' contains no roles", file_name(path))]
    EmptyCatalog { path: PathBuf },

    #[error("No data found for the job role '{query}'")]
    NotFound { query: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Lookup,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::MissingSource { .. }
            | PlannerError::MalformedSource { .. }
            | PlannerError::Schema { .. }
            | PlannerError::EmptyCatalog { .. } => ErrorCategory::Source,
            PlannerError::NotFound { .. } => ErrorCategory::Lookup,
            PlannerError::ConfigError { .. } | PlannerError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            PlannerError::IoError(_) | PlannerError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Source | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 載入錯誤會中止整個工作階段；查無角色則可重試
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PlannerError::NotFound { .. })
    }

    /// Malformed 錯誤附帶的原始內容預覽
    pub fn preview(&self) -> Option<&str> {
        match self {
            PlannerError::MalformedSource { preview, .. } => Some(preview),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::MissingSource { path } => format!(
                "Error: '{}' not found at expected path: {}",
                file_name(path),
                path.display()
            ),
            PlannerError::MalformedSource { path, source, .. } => format!(
                "Error: Could not decode JSON from '{}' ({}). Please check the file for formatting errors (e.g., trailing commas, incorrect quotes).",
                file_name(path),
                source
            ),
            PlannerError::Schema { path, message } => format!(
                "Error: JSON file '{}' should contain a top-level key 'IT_Roles' with a list of roles ({}).",
                file_name(path),
                message
            ),
            PlannerError::EmptyCatalog { .. } => {
                "Could not load career data. Unable to proceed.".to_string()
            }
            PlannerError::NotFound { query } => format!(
                "Sorry, no data found for the job role '{}'. Please check the spelling or select from the list.",
                query
            ),
            PlannerError::ConfigError { message } => format!("Configuration problem: {}", message),
            PlannerError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Invalid setting {} = '{}': {}", field, value, reason),
            PlannerError::IoError(e) => {
                format!("An unexpected error occurred while loading data: {}", e)
            }
            PlannerError::SerializationError(e) => {
                format!("Could not format the roadmap output: {}", e)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PlannerError::MissingSource { path } => match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => format!(
                    "Ensure the JSON file is in {} or pass its location with --data",
                    dir.display()
                ),
                _ => "Pass the catalog location with --data".to_string(),
            },
            PlannerError::MalformedSource { .. } => {
                "Fix the JSON syntax; the start of the file is shown above to spot hidden characters or a BOM".to_string()
            }
            PlannerError::Schema { .. } => {
                "Wrap the role entries in an object: { \"IT_Roles\": [ ... ] }".to_string()
            }
            PlannerError::EmptyCatalog { .. } => {
                "Add at least one role entry under 'IT_Roles'".to_string()
            }
            PlannerError::NotFound { .. } => {
                "Select a role from the list or check the spelling".to_string()
            }
            PlannerError::ConfigError { .. } | PlannerError::InvalidConfigValueError { .. } => {
                "Check the command line flags and the settings file".to_string()
            }
            PlannerError::IoError(_) => {
                "Check that the file is readable and UTF-8 encoded".to_string()
            }
            PlannerError::SerializationError(_) => "Retry with another output format".to_string(),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_recoverable() {
        let err = PlannerError::NotFound {
            query: "Quantum Engineer".to_string(),
        };
        assert!(!err.is_fatal());
        assert_eq!(err.category(), ErrorCategory::Lookup);
        assert!(err
            .user_friendly_message()
            .contains("no data found for the job role 'Quantum Engineer'"));
    }

    #[test]
    fn test_missing_source_shows_expected_path() {
        let err = PlannerError::MissingSource {
            path: PathBuf::from("/opt/planner/career_data.json"),
        };
        assert!(err.is_fatal());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err
            .user_friendly_message()
            .contains("/opt/planner/career_data.json"));
        assert!(err.recovery_suggestion().contains("/opt/planner"));
    }

    #[test]
    fn test_serialization_error_is_about_output() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = PlannerError::from(source);

        let message = err.user_friendly_message();
        assert!(message.starts_with("Could not format the roadmap output"));
        assert!(!message.contains("loading data"));
        assert_eq!(err.recovery_suggestion(), "Retry with another output format");
    }

    #[test]
    fn test_io_error_is_about_loading() {
        let err = PlannerError::from(std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"));
        assert!(err
            .user_friendly_message()
            .contains("while loading data: bad utf-8"));
    }
}
