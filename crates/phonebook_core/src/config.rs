//! Runtime configuration for a phonebook instance.
//!
//! # Responsibility
//! - Hold the namespace, database path and logging settings.
//! - Normalize user-supplied values before they reach storage or logging.
//!
//! # Invariants
//! - A normalized namespace is non-empty and contains no whitespace.
//! - A normalized log directory is absolute.

use std::path::{Path, PathBuf};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "phoneBook-backbone";
/// Database file created in the working directory by default.
pub const DEFAULT_DB_FILE_NAME: &str = "phonebook.sqlite3";

/// Validated settings for opening one phonebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonebookConfig {
    pub namespace: String,
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for PhonebookConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl PhonebookConfig {
    /// Builds a config from raw values, falling back to defaults for `None`.
    ///
    /// # Errors
    /// Returns a human-readable message for the first invalid value.
    pub fn from_parts(
        namespace: Option<&str>,
        db_path: Option<&Path>,
        log_level: Option<&str>,
        log_dir: Option<&str>,
    ) -> Result<Self, String> {
        let defaults = Self::default();
        Ok(Self {
            namespace: match namespace {
                Some(value) => normalize_namespace(value)?,
                None => defaults.namespace,
            },
            db_path: db_path.map_or(defaults.db_path, Path::to_path_buf),
            log_level: match log_level {
                Some(value) => normalize_level(value)?,
                None => defaults.log_level,
            },
            log_dir: log_dir.map(normalize_log_dir).transpose()?,
        })
    }
}

/// Returns the default log level for current build mode.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub fn normalize_namespace(namespace: &str) -> Result<String, String> {
    let trimmed = namespace.trim();
    if trimmed.is_empty() {
        return Err("namespace cannot be empty".to_string());
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(format!("namespace must not contain whitespace, got `{trimmed}`"));
    }
    Ok(trimmed.to_string())
}

pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

pub fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_builtin_namespace_and_file() {
        let config = PhonebookConfig::from_parts(None, None, None, None).unwrap();
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn default_namespace_matches_stored_book_name_and_is_valid() {
        assert_eq!(DEFAULT_NAMESPACE, "phoneBook-backbone");
        assert_eq!(normalize_namespace(DEFAULT_NAMESPACE).unwrap(), DEFAULT_NAMESPACE);
    }

    #[test]
    fn namespace_is_trimmed_and_rejects_blank_or_spaced_values() {
        assert_eq!(normalize_namespace("  work ").unwrap(), "work");
        assert!(normalize_namespace("   ").is_err());
        assert!(normalize_namespace("my book").is_err());
    }

    #[test]
    fn level_normalization_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let error = normalize_log_dir("logs/dev").unwrap_err();
        assert!(error.contains("absolute"));
    }

    #[test]
    fn from_parts_reports_first_invalid_value() {
        let error = PhonebookConfig::from_parts(Some("ok"), None, Some("loud"), None).unwrap_err();
        assert!(error.contains("unsupported log level"));
    }
}
