// File: ./src/logging.rs
//! Logger bootstrap for the binary. The terminal belongs to the TUI, so logs go
//! to `<data dir>/notepad.log`; stderr is only used when the file can't be opened.

use crate::context::AppContext;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;

/// Unknown names fall back to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Installs the global logger. Safe to call more than once; later calls are ignored.
pub fn init(ctx: &dyn AppContext, level: &str) {
    let filter = parse_level(level);
    let config = ConfigBuilder::new()
        .add_filter_allow_str("notepad")
        .build();

    let file = ctx.get_log_path().and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    let result = match file {
        Some(file) => WriteLogger::init(filter, config, file),
        None => TermLogger::init(
            LevelFilter::Warn.min(filter),
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    };

    if result.is_ok() {
        log::info!("Logging initialized at {}", filter);
    }
}
