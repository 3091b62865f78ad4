//! Event collector for batch file processing with cargo-style output
//!
//! Warnings and errors raised while a file context is active are grouped by
//! file so that skipped files can be reported together once the walk ends.

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// ============================================================================
// FILE PROCESSING CONTEXT
// ============================================================================

/// Context information for file processing
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self { file_path, file_id }
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

/// Counts of files that raised events during a run
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub files_with_events: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe event collector keyed by file path
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
        }
    }

    /// Record an event for a specific file
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = self.file_events.lock().unwrap();

        let total: usize = events.values().map(|v| v.len()).sum();
        if total >= LOG_BUFFER_SIZE {
            return;
        }

        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < MAX_LOG_EVENTS_PER_FILE {
            file_events.push(event);
        } else if file_events.len() == MAX_LOG_EVENTS_PER_FILE {
            file_events.push(LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            )));
        }
    }

    /// Get all file events (for cargo-style output)
    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        self.file_events.lock().unwrap().clone()
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        let events = self.file_events.lock().unwrap();

        let mut summary = ProcessingSummary {
            files_with_events: events.len(),
            ..ProcessingSummary::default()
        };

        for file_events in events.values() {
            let has_errors = file_events.iter().any(|e| e.is_error());
            let has_warnings = file_events.iter().any(|e| e.is_warning());

            if has_errors {
                summary.failed_files += 1;
            } else if has_warnings {
                summary.files_with_warnings += 1;
            }

            summary.total_errors += file_events.iter().filter(|e| e.is_error()).count();
            summary.total_warnings += file_events.iter().filter(|e| e.is_warning()).count();
        }

        summary
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

/// Format collected warnings and errors grouped by file.
///
/// Returns an empty string when nothing was collected.
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();
    let all_events = collector.get_all_file_events();

    for (file_path, events) in &all_events {
        let reportable: Vec<_> = events
            .iter()
            .filter(|e| e.is_error() || e.is_warning())
            .collect();

        if reportable.is_empty() {
            continue;
        }

        for event in reportable {
            let label = if event.is_error() { "error" } else { "warning" };
            output.push_str(&format!(
                "{}[{}]: {}\n --> {}\n",
                label,
                event.code.as_str(),
                event.message,
                file_path.display()
            ));

            for (key, value) in &event.context {
                if key != "file" && key != "file_id" {
                    output.push_str(&format!("  = {}: {}\n", key, value));
                }
            }

            let action = event.recommended_action();
            if action != "No specific action available" {
                output.push_str(&format!("  = help: {}\n", action));
            }
        }

        output.push('\n');
    }

    let summary = collector.get_summary();

    if summary.total_errors > 0 {
        output.push_str(&format!("Total errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!(
            "Total warnings: {} ({} files skipped)\n",
            summary.total_warnings, summary.files_with_warnings
        ));
    }

    output
}
