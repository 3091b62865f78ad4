//! File processor module: reading, cleaning and rewriting individual source files

mod encoding;
mod processor;

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::config::runtime::FileProcessorPreferences;
use crate::log_debug;
use std::path::Path;

pub use encoding::{LineEnding, SourceEncoding};
pub use processor::{
    CleanOutcome, FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError,
};

/// Clean a single file with default settings
pub fn process_file<P: AsRef<Path>>(path: P) -> Result<CleanOutcome, FileProcessorError> {
    processor::clean_file(path.as_ref())
}

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    processor::create_processor_from_preferences(prefs)
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

/// Get the compile-time large file threshold
pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

/// Validate that every file processor code is registered (for system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    use crate::logging::codes::{self, file_processing};

    let required_codes = [
        file_processing::FILE_NOT_FOUND,
        file_processing::FILE_TOO_LARGE,
        file_processing::PERMISSION_DENIED,
        file_processing::INVALID_ENCODING,
        file_processing::IO_ERROR,
        file_processing::INVALID_PATH,
        file_processing::WRITE_FAILED,
    ];

    for code in &required_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Enemy.cs");
        fs::write(&file_path, "class Enemy {} /* todo */\n").unwrap();

        let outcome = process_file(&file_path).unwrap();
        assert!(outcome.was_written());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "class Enemy {}\n");
    }

    #[test]
    fn test_compile_time_constants_access() {
        assert_eq!(get_max_file_size(), FileProcessor::max_file_size());
        assert!(get_large_file_threshold() > 0);
        assert!(get_large_file_threshold() <= get_max_file_size());
    }

    #[test]
    fn test_init_logging() {
        assert!(init_file_processor_logging().is_ok());
    }
}
