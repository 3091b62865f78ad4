//! File processor implementation with compile-time constants and global logging integration

use super::encoding::{LineEnding, SourceEncoding};
use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::stripper::{self, StripStats};
use crate::{log_debug, log_error, log_performance, log_success, log_warning};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File processor specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::WriteFailed { .. } => codes::file_processing::WRITE_FAILED,
        }
    }

    /// Check if this error should halt processing
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_read_error(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            },
            ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("{}: {}", path.display(), error),
            },
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    pub line_count: usize,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Check if file is large enough to log at info level (uses compile-time threshold)
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

/// Decoded file contents with everything needed to write them back
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    /// File contents with line endings normalized to `\n`
    pub source: String,
    pub metadata: FileMetadata,
    pub encoding: SourceEncoding,
    pub line_ending: LineEnding,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

/// What happened to a single file
#[derive(Debug, Clone)]
pub enum CleanOutcome {
    /// Comments or whitespace were removed and the file was rewritten
    Cleaned { stats: StripStats },
    /// Cleaning left the text as it was; nothing was written
    Unchanged,
    /// The file could not be read and was left alone
    Skipped { reason: FileProcessorError },
}

impl CleanOutcome {
    pub fn was_written(&self) -> bool {
        matches!(self, CleanOutcome::Cleaned { .. })
    }
}

/// File processor with compile-time size limits and runtime preferences
pub struct FileProcessor {
    /// Write Latin-1 sources back as Latin-1 (runtime preference)
    pub preserve_encoding: bool,
    /// Restore CRLF on files that used it (runtime preference)
    pub preserve_line_endings: bool,
    /// Whether to log per-file timing and strip statistics (runtime preference)
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            preserve_encoding: true,
            preserve_line_endings: true,
            enable_performance_logging: false,
        }
    }

    /// Create file processor from runtime preferences
    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            preserve_encoding: prefs.preserve_encoding,
            preserve_line_endings: prefs.preserve_line_endings,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn with_line_endings_preserved(mut self, preserved: bool) -> Self {
        self.preserve_line_endings = preserved;
        self
    }

    pub fn with_encoding_preserved(mut self, preserved: bool) -> Self {
        self.preserve_encoding = preserved;
        self
    }

    /// Get the compile-time maximum file size
    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read, clean and conditionally rewrite one file.
    ///
    /// Read failures are logged as warnings and reported as
    /// [`CleanOutcome::Skipped`]; only a failed write is an `Err`.
    pub fn clean_file(&self, path: &Path) -> Result<CleanOutcome, FileProcessorError> {
        let start_time = Instant::now();

        let file = match self.read_file(path) {
            Ok(file) => file,
            Err(reason) => {
                log_warning!(reason.error_code(), "Skipping unreadable file",
                    "path" => path.display(),
                    "reason" => &reason);
                return Ok(CleanOutcome::Skipped { reason });
            }
        };

        let (cleaned, stats) = stripper::clean_with_stats(&file.source);

        if cleaned == file.source {
            log_success!(codes::success::FILE_UNCHANGED, "File already clean",
                "path" => path.display());
            return Ok(CleanOutcome::Unchanged);
        }

        self.write_file(path, &cleaned, file.encoding, file.line_ending)?;

        if self.enable_performance_logging {
            log_performance!(codes::success::FILE_CLEANED, "File cleaned",
                duration = start_time.elapsed(),
                "path" => path.display(),
                "size_human" => file.metadata.human_readable_size(),
                "comments_removed" => stats.comments_removed(),
                "literals_preserved" => stats.literals_preserved,
                "bytes_removed" => stats.bytes_removed);
        } else if file.metadata.is_large_file() {
            log_success!(codes::success::FILE_CLEANED, "Large file cleaned",
                "path" => path.display(),
                "size_human" => file.metadata.human_readable_size());
        }

        Ok(CleanOutcome::Cleaned { stats })
    }

    /// Read and decode a file, normalizing line endings
    pub fn read_file(&self, path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();

        let metadata = fs::metadata(path).map_err(|e| FileProcessorError::from_read_error(path, e))?;

        if !metadata.is_file() {
            return Err(FileProcessorError::InvalidPath {
                path: path.display().to_string(),
            });
        }

        if metadata.len() > MAX_FILE_SIZE {
            return Err(FileProcessorError::FileTooLarge {
                size: metadata.len(),
                max_size: MAX_FILE_SIZE,
            });
        }

        let bytes = fs::read(path).map_err(|e| FileProcessorError::from_read_error(path, e))?;
        let size = bytes.len() as u64;
        let (raw, encoding) = SourceEncoding::decode(bytes);

        if encoding == SourceEncoding::Latin1 {
            log_debug!("File is not valid UTF-8, decoded as Latin-1",
                "path" => path.display(),
                "code" => codes::file_processing::INVALID_ENCODING);
        }

        let line_ending = LineEnding::detect(&raw);
        let source = LineEnding::normalize(&raw);
        let line_count = source.lines().count();

        Ok(FileProcessingResult {
            source,
            metadata: FileMetadata {
                path: path.to_path_buf(),
                size,
                line_count,
            },
            encoding,
            line_ending,
            processing_duration: start_time.elapsed(),
        })
    }

    /// Write cleaned text back in place, honoring the encoding and line-ending preferences
    pub fn write_file(
        &self,
        path: &Path,
        text: &str,
        encoding: SourceEncoding,
        line_ending: LineEnding,
    ) -> Result<(), FileProcessorError> {
        let text = if self.preserve_line_endings {
            line_ending.apply(text)
        } else {
            text.to_string()
        };

        let target = if self.preserve_encoding {
            encoding
        } else {
            SourceEncoding::Utf8
        };

        let bytes = match target.encode(&text) {
            Some(bytes) => bytes,
            None => {
                log_debug!("Text not representable in source encoding, writing UTF-8",
                    "path" => path.display(),
                    "encoding" => target.as_str());
                text.into_bytes()
            }
        };

        fs::write(path, &bytes).map_err(|e| {
            let error = FileProcessorError::WriteFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            };
            log_error!(error.error_code(), "Failed to write cleaned file",
                "path" => path.display(),
                "io_error" => e);
            error
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MODULE API FUNCTIONS
// ============================================================================

/// Clean a file with default settings
pub fn clean_file(path: &Path) -> Result<CleanOutcome, FileProcessorError> {
    FileProcessor::new().clean_file(path)
}

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}
