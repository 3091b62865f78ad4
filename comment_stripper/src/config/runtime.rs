// RUNTIME CONFIGURATION (paths, filters and user preferences)

use crate::logging::{codes, Code, LogLevel};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Runtime configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Extension filter must not be empty")]
    EmptyExtension,

    #[error("Extension filter must not start with a dot: {extension}")]
    DottedExtension { extension: String },

    #[error("Excluded directory fragment must not be empty")]
    EmptyExclusion,

    #[error("Search directory must be relative to the project root: {path}")]
    AbsoluteSearchDir { path: String },
}

impl ConfigError {
    pub fn error_code(&self) -> Code {
        codes::system::CONFIGURATION_INVALID
    }
}

/// Directory walk and file selection settings.
///
/// The values are fixed defaults; the program exposes no flags for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanConfig {
    /// Directory scanned non-recursively for loose source files
    pub project_root: PathBuf,
    /// Directory (relative to `project_root`) scanned recursively
    pub search_dir: PathBuf,
    /// File extension to process, without the leading dot
    pub extension: String,
    /// Any directory whose full path contains one of these is pruned
    pub excluded_dir_fragments: Vec<String>,
    /// File names skipped in the project root pass
    pub excluded_file_names: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            search_dir: PathBuf::from("Assets"),
            extension: "cs".to_string(),
            excluded_dir_fragments: vec![
                "Library".to_string(),
                "Temp".to_string(),
                ".git".to_string(),
                "Packages".to_string(),
            ],
            excluded_file_names: vec![
                "clean_comments.py".to_string(),
                "syntax_check.cs".to_string(),
            ],
        }
    }
}

impl CleanConfig {
    /// Default configuration rooted at `project_root`
    pub fn for_project<P: AsRef<Path>>(project_root: P) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Full path of the recursively scanned directory
    pub fn search_path(&self) -> PathBuf {
        self.project_root.join(&self.search_dir)
    }

    /// Check whether a path falls under an excluded directory fragment
    pub fn is_excluded_path(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excluded_dir_fragments
            .iter()
            .any(|fragment| path_str.contains(fragment.as_str()))
    }

    /// Check whether a file name is excluded from the project root pass
    pub fn is_excluded_file_name(&self, file_name: &str) -> bool {
        self.excluded_file_names.iter().any(|name| name == file_name)
    }

    /// Check whether a path carries the configured extension
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == self.extension)
            .unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::EmptyExtension);
        }

        if self.extension.starts_with('.') {
            return Err(ConfigError::DottedExtension {
                extension: self.extension.clone(),
            });
        }

        if self.excluded_dir_fragments.iter().any(|f| f.is_empty()) {
            return Err(ConfigError::EmptyExclusion);
        }

        if self.search_dir.is_absolute() {
            return Err(ConfigError::AbsoluteSearchDir {
                path: self.search_dir.display().to_string(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Write Latin-1 sources back as Latin-1 instead of UTF-8
    pub preserve_encoding: bool,

    /// Restore CRLF line endings on files that used them
    pub preserve_line_endings: bool,

    /// Whether to log per-file strip statistics
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            preserve_encoding: env::var(env_vars::PRESERVE_ENCODING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            preserve_line_endings: env::var(env_vars::PRESERVE_LINE_ENDINGS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            enable_performance_logging: env::var(env_vars::ENABLE_PERFORMANCE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Minimum level that reaches the console
    pub min_log_level: LogLevel,

    /// Whether to attach the current file to every event
    pub include_file_context: bool,

    /// Whether to print the grouped report of skipped files at the end
    pub enable_skip_report: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            include_file_context: env::var(env_vars::LOGGING_INCLUDE_FILE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            enable_skip_report: env::var(env_vars::LOGGING_SKIP_REPORT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub clean: CleanConfig,
    pub file_processor: FileProcessorPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const PRESERVE_ENCODING: &str = "CSCLEAN_PRESERVE_ENCODING";
    pub const PRESERVE_LINE_ENDINGS: &str = "CSCLEAN_PRESERVE_LINE_ENDINGS";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "CSCLEAN_ENABLE_PERFORMANCE_LOGGING";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "CSCLEAN_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "CSCLEAN_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "CSCLEAN_LOGGING_INCLUDE_FILE_CONTEXT";
    pub const LOGGING_SKIP_REPORT: &str = "CSCLEAN_LOGGING_SKIP_REPORT";
}
