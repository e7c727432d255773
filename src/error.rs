// File: ./src/error.rs
//! Error types for note actions and the reporter that reacts to them.

use crate::navigation::{Navigate, Route};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Everything that can go wrong between issuing a request and dispatching its result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The server answered with a non-success status. `reason` is the status text.
    #[error("{reason}")]
    Status { status: u16, reason: String },

    /// No response was received.
    #[error("Network error: {0}")]
    Transport(String),

    /// The response body could not be read.
    #[error("Failed to read response: {0}")]
    Body(String),

    /// The response body was not the expected JSON.
    #[error("Invalid JSON response: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type ActionResult = Result<(), ActionError>;

/// Reaction to a failed action. Invoked exactly once per failure.
pub trait ReportError: Send + Sync {
    fn report(&self, error: &ActionError);
}

/// Default reporter: sends the user to the error page and keeps the message
/// around for whatever view renders it.
pub struct ErrorPage {
    navigator: Arc<dyn Navigate>,
    last: Mutex<Option<String>>,
}

impl ErrorPage {
    pub fn new(navigator: Arc<dyn Navigate>) -> Self {
        Self {
            navigator,
            last: Mutex::new(None),
        }
    }

    pub fn last_error(&self) -> Option<String> {
        self.last.lock().ok().and_then(|g| g.clone())
    }
}

impl ReportError for ErrorPage {
    fn report(&self, error: &ActionError) {
        log::error!("Note action failed: {}", error);
        self.navigator.push(Route::Error);
        if let Ok(mut g) = self.last.lock() {
            *g = Some(error.to_string());
        }
    }
}
