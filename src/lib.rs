// Crate root library declaration and module exports.
pub mod actions;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod signal;
pub mod store;

#[cfg(feature = "tui")]
pub mod tui;
