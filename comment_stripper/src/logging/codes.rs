//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const CONFIGURATION_INVALID: Code = Code::new("ERR004");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const WRITE_FAILED: Code = Code::new("E013");
}

/// Directory walk error codes
pub mod walker {
    use super::Code;

    pub const DIRECTORY_NOT_FOUND: Code = Code::new("E060");
    pub const TRAVERSAL_ERROR: Code = Code::new("E061");
}

/// Success codes
pub mod success {
    use super::Code;

    // System
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing
    pub const FILE_CLEANED: Code = Code::new("I008");
    pub const FILE_UNCHANGED: Code = Code::new("I009");

    // Directory walk
    pub const DISCOVERY_COMPLETE: Code = Code::new("I030");
    pub const BATCH_COMPLETE: Code = Code::new("I031");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR004",
                "System",
                Severity::High,
                false,
                true,
                "Invalid clean configuration",
                "Correct the extension filter or exclusion lists",
            ),
            // File processing errors
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                true,
                false,
                "File not found at specified path",
                "Check whether the file was removed during the run",
            ),
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Medium,
                true,
                false,
                "File exceeds the compile-time size limit",
                "Clean the file manually or raise max_file_size in the build profile",
            ),
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::Medium,
                true,
                false,
                "Permission denied reading file",
                "Check file permissions",
            ),
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File is not valid UTF-8",
                "File was decoded as Latin-1; verify its encoding",
            ),
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::Medium,
                true,
                false,
                "I/O error reading file",
                "Check the file system and retry",
            ),
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "Path is not a regular file",
                "Remove the path from the search directory",
            ),
            ErrorMetadata::new(
                "E013",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Failed to write cleaned file",
                "Check disk space and write permissions; the file may be truncated",
            ),
            // Walker errors
            ErrorMetadata::new(
                "E060",
                "Walker",
                Severity::Low,
                true,
                false,
                "Search directory does not exist",
                "Run from the project root that contains the search directory",
            ),
            ErrorMetadata::new(
                "E061",
                "Walker",
                Severity::Medium,
                true,
                false,
                "Directory entry could not be read during traversal",
                "Check directory permissions",
            ),
        ];

        entries.into_iter().map(|m| (m.code, m)).collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_has_metadata() {
        let codes = [
            system::CONFIGURATION_INVALID,
            file_processing::FILE_NOT_FOUND,
            file_processing::FILE_TOO_LARGE,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            file_processing::INVALID_PATH,
            file_processing::WRITE_FAILED,
            walker::DIRECTORY_NOT_FOUND,
            walker::TRAVERSAL_ERROR,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category("E013"), "FileProcessing");
        assert!(requires_halt("E013"));
        assert!(!is_recoverable("E013"));
        assert!(is_recoverable("E009"));
        assert_eq!(get_severity("E060"), Severity::Low);
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_action("X999"), "No specific action available");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_severity("X999"), Severity::Medium);
        assert!(!requires_halt("X999"));
    }
}
