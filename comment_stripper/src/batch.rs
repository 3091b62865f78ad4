//! Batch cleaning over a project directory
//!
//! Discovers `.cs` files under the search directory (recursively, pruning
//! excluded directories) and directly in the project root, then cleans them
//! one at a time with per-file logging context.

use crate::config::CleanConfig;
use crate::file_processor::{CleanOutcome, FileProcessor, FileProcessorError};
use crate::logging::{self, codes, Code};
use crate::stripper::StripStats;
use crate::{log_debug, log_info, log_success, log_warning};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

/// Counters accumulated over one run
#[derive(Debug, Clone, Default)]
pub struct BatchResults {
    pub files_discovered: usize,
    pub files_cleaned: usize,
    pub files_unchanged: usize,
    pub files_skipped: usize,
    pub skipped_files: Vec<PathBuf>,
    pub stats: StripStats,
    pub processing_duration: Duration,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files_processed(&self) -> usize {
        self.files_cleaned + self.files_unchanged + self.files_skipped
    }

    pub fn record(&mut self, file_path: &Path, outcome: CleanOutcome) {
        match outcome {
            CleanOutcome::Cleaned { stats } => {
                self.files_cleaned += 1;
                self.stats += stats;
            }
            CleanOutcome::Unchanged => self.files_unchanged += 1,
            CleanOutcome::Skipped { .. } => {
                self.files_skipped += 1;
                self.skipped_files.push(file_path.to_path_buf());
            }
        }
    }

    /// The line printed on standard output at the end of a run
    pub fn summary_line(&self) -> String {
        format!("Cleaned {} files.", self.files_cleaned)
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch cleaning completed: {} files processed, {} cleaned, {} unchanged, {} skipped, {} comments removed, {:.2}s total",
            self.files_processed(),
            self.files_cleaned,
            self.files_unchanged,
            self.files_skipped,
            self.stats.comments_removed(),
            self.processing_duration.as_secs_f64()
        )
    }
}

/// Batch processing errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Aborting run: {0}")]
    Write(#[source] FileProcessorError),
}

impl BatchError {
    pub fn error_code(&self) -> Code {
        match self {
            BatchError::Write(error) => error.error_code(),
        }
    }
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Discover every file a run should clean.
///
/// Search-directory files come first in walk order, followed by files in the
/// project root. Both passes visit entries sorted by file name. Symlinked
/// files are included; symlinked directories are not descended into.
pub fn discover_files(config: &CleanConfig) -> Vec<PathBuf> {
    let search_path = config.search_path();

    log_info!("Starting file discovery",
        "search_dir" => search_path.display(),
        "project_root" => config.project_root.display());

    let mut files = Vec::new();

    if search_path.is_dir() {
        collect_search_dir(config, &search_path, &mut files);
    } else {
        log_warning!(codes::walker::DIRECTORY_NOT_FOUND, "Search directory not found",
            "path" => search_path.display());
    }

    collect_project_root(config, &mut files);

    log_success!(codes::success::DISCOVERY_COMPLETE, "File discovery completed",
        "files_found" => files.len());

    files
}

/// Recursive pass; excluded directories are pruned before descending
fn collect_search_dir(config: &CleanConfig, search_path: &Path, files: &mut Vec<PathBuf>) {
    let walker = WalkDir::new(search_path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir() && is_excluded_dir(config, entry.path()))
        });

    for entry in walker {
        match entry {
            Ok(entry) => {
                if is_file(&entry) && config.matches_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| search_path.display().to_string());
                log_warning!(codes::walker::TRAVERSAL_ERROR, "Could not read directory entry",
                    "path" => path,
                    "error" => e);
            }
        }
    }
}

/// Non-recursive pass over the project root, minus the excluded file names
fn collect_project_root(config: &CleanConfig, files: &mut Vec<PathBuf>) {
    let walker = WalkDir::new(&config.project_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => {
                if !is_file(&entry) || !config.matches_extension(entry.path()) {
                    continue;
                }

                let name = entry.file_name().to_string_lossy();
                if config.is_excluded_file_name(&name) {
                    log_debug!("Skipping excluded root file", "file" => name);
                    continue;
                }

                files.push(entry.into_path());
            }
            Err(e) => {
                log_warning!(codes::walker::TRAVERSAL_ERROR, "Could not read project root entry",
                    "path" => config.project_root.display(),
                    "error" => e);
            }
        }
    }
}

/// Exclusion fragments are matched against the path relative to the project root
fn is_excluded_dir(config: &CleanConfig, dir: &Path) -> bool {
    let relative = dir.strip_prefix(&config.project_root).unwrap_or(dir);
    config.is_excluded_path(relative)
}

/// Regular files, plus symlinks whose target is a regular file
fn is_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Discover and clean every file, stopping at the first write failure
pub fn run_batch(
    config: &CleanConfig,
    processor: &FileProcessor,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    let files = discover_files(config);
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, file_path) in files.iter().enumerate() {
        let outcome = logging::with_file_context(file_path.clone(), file_id, || {
            processor.clean_file(file_path)
        });

        match outcome {
            Ok(outcome) => results.record(file_path, outcome),
            Err(error) => return Err(BatchError::Write(error)),
        }
    }

    results.processing_duration = start_time.elapsed();

    log_success!(codes::success::BATCH_COMPLETE, "Batch cleaning completed",
        "files_processed" => results.files_processed(),
        "cleaned" => results.files_cleaned,
        "unchanged" => results.files_unchanged,
        "skipped" => results.files_skipped,
        "stats" => serde_json::to_string(&results.stats).unwrap_or_default(),
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0));

    Ok(results)
}

/// Clean a project with the default configuration and processor
pub fn process_project(project_root: &Path) -> Result<BatchResults, BatchError> {
    let config = CleanConfig::for_project(project_root);
    run_batch(&config, &FileProcessor::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sample_project(root: &Path) {
        write(&root.join("Assets/Scripts/Player.cs"), "int hp; // health\n");
        write(&root.join("Assets/Plain.cs"), "int x;\n");
        write(&root.join("Assets/notes.txt"), "// not C#\n");
        write(&root.join("Assets/Library/Cached.cs"), "// cached\n");
        write(&root.join("Assets/Scripts/Temp/Scratch.cs"), "// scratch\n");
        write(&root.join("Root.cs"), "/* root */ class Root {}\n");
        write(&root.join("syntax_check.cs"), "// keep\n");
        write(&root.join("clean_comments.py"), "# keep\n");
    }

    #[test]
    fn test_file_discovery() {
        let temp_dir = tempdir().unwrap();
        sample_project(temp_dir.path());

        let config = CleanConfig::for_project(temp_dir.path());
        let files = discover_files(&config);

        let relative: Vec<PathBuf> = files
            .iter()
            .map(|f| f.strip_prefix(temp_dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("Assets/Plain.cs"),
                PathBuf::from("Assets/Scripts/Player.cs"),
                PathBuf::from("Root.cs"),
            ]
        );
    }

    #[test]
    fn test_run_batch_counts_only_modified_files() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        sample_project(root);

        let results = process_project(root).unwrap();

        assert_eq!(results.files_discovered, 3);
        assert_eq!(results.files_cleaned, 2);
        assert_eq!(results.files_unchanged, 1);
        assert_eq!(results.files_skipped, 0);
        assert_eq!(results.stats.line_comments, 1);
        assert_eq!(results.stats.block_comments, 1);
        assert_eq!(results.summary_line(), "Cleaned 2 files.");

        assert_eq!(
            fs::read_to_string(root.join("Assets/Scripts/Player.cs")).unwrap(),
            "int hp;\n"
        );
        assert_eq!(fs::read_to_string(root.join("Root.cs")).unwrap(), " class Root {}\n");
        assert_eq!(
            fs::read_to_string(root.join("Assets/Library/Cached.cs")).unwrap(),
            "// cached\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("Assets/Scripts/Temp/Scratch.cs")).unwrap(),
            "// scratch\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("syntax_check.cs")).unwrap(),
            "// keep\n"
        );
    }

    #[test]
    fn test_second_run_cleans_nothing() {
        let temp_dir = tempdir().unwrap();
        sample_project(temp_dir.path());

        process_project(temp_dir.path()).unwrap();
        let second = process_project(temp_dir.path()).unwrap();

        assert_eq!(second.files_cleaned, 0);
        assert_eq!(second.summary_line(), "Cleaned 0 files.");
    }

    #[test]
    fn test_missing_search_dir_still_cleans_root() {
        let temp_dir = tempdir().unwrap();
        write(&temp_dir.path().join("Loose.cs"), "a(); // b\n");

        let results = process_project(temp_dir.path()).unwrap();

        assert_eq!(results.files_discovered, 1);
        assert_eq!(results.files_cleaned, 1);
    }

    #[test]
    fn test_excluded_search_dir_is_pruned() {
        let temp_dir = tempdir().unwrap();
        write(&temp_dir.path().join("Packages/A.cs"), "// a\n");

        let mut config = CleanConfig::for_project(temp_dir.path());
        config.search_dir = PathBuf::from("Packages");

        assert!(discover_files(&config).is_empty());
    }

    #[test]
    fn test_deeply_nested_files_are_cleaned() {
        let temp_dir = tempdir().unwrap();
        let mut deep = temp_dir.path().join("Assets");
        for _ in 0..70 {
            deep.push("d");
        }
        let deep_file = deep.join("Deep.cs");
        write(&deep_file, "int a; // c\n");

        let results = process_project(temp_dir.path()).unwrap();

        assert_eq!(results.files_discovered, 1);
        assert_eq!(results.files_cleaned, 1);
        assert_eq!(fs::read_to_string(&deep_file).unwrap(), "int a;\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_cleaned() {
        use std::os::unix::fs::symlink;

        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        let target = root.join("Shared/Linked.cs");
        write(&target, "int b; /* shared */\n");
        fs::create_dir_all(root.join("Assets")).unwrap();
        symlink(&target, root.join("Assets/Link.cs")).unwrap();
        symlink(root.join("Shared"), root.join("Assets/SharedDir")).unwrap();

        let config = CleanConfig::for_project(root);
        let files = discover_files(&config);
        assert_eq!(files, vec![root.join("Assets/Link.cs")]);

        let results = run_batch(&config, &FileProcessor::new()).unwrap();
        assert_eq!(results.files_cleaned, 1);
        assert_eq!(fs::read_to_string(&target).unwrap(), "int b;\n");
    }

    #[test]
    fn test_write_failure_error_code() {
        let error = BatchError::Write(FileProcessorError::WriteFailed {
            path: "A.cs".to_string(),
            message: "disk full".to_string(),
        });
        assert_matches!(&error, BatchError::Write(FileProcessorError::WriteFailed { .. }));
        assert_eq!(error.error_code(), codes::file_processing::WRITE_FAILED);
    }

    #[test]
    fn test_batch_results_record() {
        let mut results = BatchResults::new();
        results.record(Path::new("A.cs"), CleanOutcome::Unchanged);
        results.record(
            Path::new("B.cs"),
            CleanOutcome::Cleaned {
                stats: StripStats {
                    block_comments: 2,
                    ..StripStats::default()
                },
            },
        );
        results.record(
            Path::new("C.cs"),
            CleanOutcome::Skipped {
                reason: FileProcessorError::FileNotFound {
                    path: "C.cs".to_string(),
                },
            },
        );

        assert_eq!(results.files_processed(), 3);
        assert_eq!(results.stats.comments_removed(), 2);
        assert_eq!(results.skipped_files, vec![PathBuf::from("C.cs")]);
        assert!(results.summary().contains("1 cleaned"));
    }
}
