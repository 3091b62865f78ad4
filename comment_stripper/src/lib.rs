// Internal modules
pub mod batch;
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod stripper;
pub mod utils;

// Re-export key types for library consumers
pub use batch::{BatchError, BatchResults};
pub use config::CleanConfig;
pub use file_processor::{CleanOutcome, FileProcessor, FileProcessorError};
pub use stripper::{clean, StripStats};
