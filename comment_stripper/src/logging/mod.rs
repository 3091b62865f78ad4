//! Global logging module for the comment stripper
//!
//! Provides global logging with file-aware event collection,
//! cargo-style reporting of skipped files, and a macro interface.

pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use collector::{ErrorCollector, FileProcessingContext, ProcessingSummary};
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();
static GLOBAL_ERROR_COLLECTOR: OnceLock<Arc<ErrorCollector>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileProcessingContext>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system from environment preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());
    let error_collector = Arc::new(ErrorCollector::new());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    GLOBAL_ERROR_COLLECTOR
        .set(error_collector)
        .map_err(|_| "Global error collector already initialized")?;

    // Every code raised on a skip or abort path needs metadata for the report
    let required = [
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::IO_ERROR,
        codes::file_processing::WRITE_FAILED,
        codes::walker::TRAVERSAL_ERROR,
    ];
    for code in required {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Safe access to global error collector
pub fn try_get_global_error_collector() -> Option<&'static ErrorCollector> {
    GLOBAL_ERROR_COLLECTOR
        .get()
        .map(|collector| collector.as_ref())
}

// ============================================================================
// FILE CONTEXT MANAGEMENT
// ============================================================================

/// Set file context for current thread
pub fn set_file_context(file_path: PathBuf, file_id: usize) {
    let context = FileProcessingContext::new(file_path, file_id);

    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(context);
    });
}

pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with file context
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_file_context(file_path, file_id);
    let result = f();
    clear_file_context();
    result
}

/// Get current file context (used by macros)
pub fn get_current_file_context() -> Option<FileProcessingContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn build_event(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if config::include_file_context() {
        if let Some(file_ctx) = get_current_file_context() {
            event = event.with_context("file", &file_ctx.file_path.display().to_string());
            event = event.with_context("file_id", &file_ctx.file_id.to_string());
        }
    }

    event
}

/// Send an event to the logger and, when a file is active, to the collector
fn dispatch(event: LogEvent, collect: bool) {
    if collect {
        if let Some(file_ctx) = get_current_file_context() {
            if let Some(collector) = try_get_global_error_collector() {
                collector.record_event(&file_ctx.file_path, event.clone());
            }
        }
    }

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(build_event(LogEvent::error(code, message), context), true);
}

/// Log warning with context (used by log_warning! macro)
pub fn log_warning_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(
        build_event(LogEvent::warning_with_code(code, message), context),
        true,
    );
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(build_event(LogEvent::success(code, message), context), false);
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(build_event(LogEvent::info(message), context), false);
}

/// Log debug with context (used by log_debug! macro)
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(build_event(LogEvent::debug(message), context), false);
}

// ============================================================================
// BATCH REPORTING
// ============================================================================

/// Print the cargo-style report of collected warnings and errors to stderr
pub fn print_cargo_style_summary() {
    if !config::enable_skip_report() {
        return;
    }

    if let Some(collector) = try_get_global_error_collector() {
        let report = collector::format_cargo_style_errors(collector);
        if !report.is_empty() {
            eprint!("{}", report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_management() {
        let file_path = PathBuf::from("Assets/Player.cs");

        assert!(get_current_file_context().is_none());

        set_file_context(file_path.clone(), 1);
        let context = get_current_file_context();
        assert_eq!(context.map(|c| c.file_path), Some(file_path));

        clear_file_context();
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_with_file_context() {
        let file_path = PathBuf::from("Assets/Enemy.cs");

        let result = with_file_context(file_path.clone(), 2, || {
            let context = get_current_file_context();
            assert_eq!(context.map(|c| c.file_id), Some(2));
            42
        });

        assert_eq!(result, 42);
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_build_event_attaches_file() {
        let event = with_file_context(PathBuf::from("Assets/Door.cs"), 3, || {
            build_event(LogEvent::info("Cleaning"), vec![("bytes", "10")])
        });

        assert_eq!(event.context.get("bytes"), Some(&"10".to_string()));
        // File context follows the runtime preference, on by default
        if config::include_file_context() {
            assert_eq!(event.context.get("file"), Some(&"Assets/Door.cs".to_string()));
        }
    }
}
