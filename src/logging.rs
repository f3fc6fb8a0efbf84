// ── Logging setup ─────────────────────────────────────────────────────────────
//
// `log` macros everywhere, `simplelog` behind them.  Release builds run
// without a console, so the file logger is the only sink there; debug builds
// also log to the terminal.

use std::{fs::File, path::Path};

use log::LevelFilter;
use simplelog::{CombinedLogger, ConfigBuilder, SharedLogger, WriteLogger};

use crate::error::Result;

/// Log file name, written next to the settings file.
pub(crate) const LOG_FILE_NAME: &str = "Limitpad.log";

#[cfg(debug_assertions)]
const LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(not(debug_assertions))]
const LEVEL: LevelFilter = LevelFilter::Info;

/// Install the global logger, truncating `<dir>/Limitpad.log`.
///
/// Call once at startup.  A second call returns `LimitpadError::Logger`.
pub(crate) fn init(dir: &Path) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    #[cfg(debug_assertions)]
    loggers.push(simplelog::TermLogger::new(
        LEVEL,
        config.clone(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ));

    // A missing log file is not fatal; the terminal logger (debug) or nothing
    // (release) remains.
    match File::create(dir.join(LOG_FILE_NAME)) {
        Ok(file) => loggers.push(WriteLogger::new(LEVEL, config, file)),
        Err(e) => eprintln!("[limitpad] log file unavailable: {e}"),
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}
