//! Logging service implementation

use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::Arc;

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with configuration awareness
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    /// Create new logging service with specified logger and minimum level
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create service with configuration-aware settings
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let logger: Arc<dyn Logger> = if config::use_structured_logging() {
            Arc::new(StructuredLogger::new(min_level))
        } else {
            Arc::new(ConsoleLogger::new(min_level))
        };

        Self::new(logger, min_level)
    }

    /// Check if level should be logged
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Human-readable logger writing to stderr
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            eprintln!("{}", event.format());
        }
    }
}

/// Structured logger for JSON output and better tooling integration
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            match event.format_json() {
                Ok(json) => eprintln!("{}", json),
                // Fallback to regular format if JSON serialization fails
                Err(_) => eprintln!("{}", event.format()),
            }
        }
    }
}

/// Create logging service based on current configuration
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{codes, Code};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CaptureLogger {
        codes: Mutex<Vec<Code>>,
    }

    impl Logger for CaptureLogger {
        fn log(&self, event: &LogEvent) {
            self.codes.lock().unwrap().push(event.code);
        }
    }

    #[test]
    fn test_log_level_filtering() {
        let logger = Arc::new(CaptureLogger::default());
        let service = LoggingService::new(logger.clone(), LogLevel::Warning);

        service.log_event(LogEvent::debug("Debug message"));
        service.log_event(LogEvent::success(codes::success::FILE_CLEANED, "Cleaned"));
        service.log_event(LogEvent::warning_with_code(
            codes::walker::TRAVERSAL_ERROR,
            "Warning message",
        ));
        service.log_event(LogEvent::error(codes::file_processing::WRITE_FAILED, "Error"));

        assert_eq!(
            *logger.codes.lock().unwrap(),
            vec![
                codes::walker::TRAVERSAL_ERROR,
                codes::file_processing::WRITE_FAILED
            ]
        );
    }

    #[test]
    fn test_should_log() {
        let service = LoggingService::new(Arc::new(CaptureLogger::default()), LogLevel::Info);
        assert!(service.should_log(LogLevel::Error));
        assert!(service.should_log(LogLevel::Info));
        assert!(!service.should_log(LogLevel::Debug));
    }

    #[test]
    fn test_console_and_structured_loggers_do_not_panic() {
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "Test error")
            .with_context("key", "value");

        ConsoleLogger::new(LogLevel::Info).log(&event);
        StructuredLogger::new(LogLevel::Debug).log(&event);
    }
}
