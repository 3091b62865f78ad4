//! Configuration module for the comment stripper
//! Combines generated compile-time limits with runtime configuration

// Include generated constants from build.rs
// This file is generated at compile time from the TOML profile
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{CleanConfig, ConfigError, FileProcessorPreferences, LoggingPreferences};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("CSCLEAN_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("CSCLEAN_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;
    use super::*;

    #[test]
    fn test_generated_limits_are_consistent() {
        assert!(file_processing::MAX_FILE_SIZE > 0);
        assert!(file_processing::LARGE_FILE_THRESHOLD <= file_processing::MAX_FILE_SIZE);
        assert!(logging::MAX_LOG_EVENTS_PER_FILE <= logging::LOG_BUFFER_SIZE);
    }

    #[test]
    fn test_source_info() {
        let info = build_info::source_info();
        assert!(info.starts_with("Generated from "));
        assert!(info.ends_with(".toml"));
    }
}
