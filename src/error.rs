//! Error taxonomy for a single movie query attempt

use thiserror::Error;

/// Message shown when no specific diagnostic is available
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Message shown when the server matched nothing
pub const NO_RESULTS_MESSAGE: &str = "No results";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Caller passed no or blank text
    #[error("empty query")]
    EmptyQuery,

    /// Server returned zero matches
    #[error("No results")]
    EmptyResult,

    /// Network failure, unacceptable status or malformed body
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },
}

impl SearchError {
    /// Transport error carrying a provider diagnostic
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Transport error with the generic fallback message
    pub fn generic(status: Option<u16>) -> Self {
        Self::transport(status, GENERIC_MESSAGE)
    }

    /// HTTP status attached to a transport error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
