use comment_stripper::config::runtime::RuntimeConfig;
use comment_stripper::config::CleanConfig;
use comment_stripper::{batch, file_processor, log_error, logging};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = RuntimeConfig::default();

    // Preferences must be in place before the logger reads them
    logging::config::init_runtime_preferences(runtime.logging.clone())?;
    logging::init_global_logging()?;
    file_processor::init_file_processor_logging()?;

    let config = CleanConfig {
        project_root: env::current_dir()?,
        ..runtime.clean
    };

    if let Err(error) = config.validate() {
        log_error!(error.error_code(), "Invalid clean configuration", "reason" => &error);
        std::process::exit(1);
    }

    let processor = file_processor::create_processor_from_preferences(&runtime.file_processor);

    match batch::run_batch(&config, &processor) {
        Ok(results) => {
            println!("{}", results.summary_line());
            logging::print_cargo_style_summary();
        }
        Err(error) => {
            log_error!(error.error_code(), "Run aborted", "reason" => &error);
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }

    Ok(())
}
