//! Logger initialisation utility functions.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use chrono::Local;
use colored::Colorize;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug)]
pub enum LoggerInitError {
    LogFileInitError(std::io::Error),
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this process.
///
/// # Safety
/// Must only be called once, or `fern`/`log` will return a `SetLoggerError`.
pub fn init(min_level: LevelFilter, log_file_path: Option<&str>) -> Result<(), LoggerInitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{} {}] {}: {}",
                    Local::now().format("%H:%M:%S%.3f"),
                    level_to_str(record.level()),
                    record.target(),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{} {}] {}",
                    Local::now().format("%H:%M:%S%.3f"),
                    level_to_str(record.level()),
                    message
                ))
            }
        })
        .level(min_level)
        .chain(std::io::stdout());

    if let Some(path) = log_file_path {
        let file = fern::log_file(path).map_err(LoggerInitError::LogFileInitError)?;
        dispatch = dispatch.chain(file);
    }

    dispatch.apply().map_err(LoggerInitError::FernInitError)
}

/// Colorize a log level string the way the teacher's console output does.
fn level_to_str(level: log::Level) -> colored::ColoredString {
    match level {
        log::Level::Error => "ERROR".red().bold(),
        log::Level::Warn => "WARN ".yellow(),
        log::Level::Info => "INFO ".green(),
        log::Level::Debug => "DEBUG".blue(),
        log::Level::Trace => "TRACE".normal(),
    }
}
