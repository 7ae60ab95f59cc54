//! src/error.rs
//! ============================================================================
//! # Error types for the directory browser
//!
//! `ListingError` describes why a single listing round trip failed and knows
//! how to phrase that failure for the user. `AppError` is the crate-wide error
//! used by configuration, logging setup and the terminal frontend.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Message shown when the listing service could not be reached at all.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Unable to reach the directory service";

/// Failure of one listing request. Every variant is terminal for that
/// navigation attempt; nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    /// Connection, IO or timeout failure before a complete response arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status.
    #[error("Listing request failed with status {status}: {message}")]
    Application { status: u16, message: String },

    /// Backend answered 2xx but the payload did not have the expected shape.
    #[error("Malformed listing response: {0}")]
    Malformed(String),
}

impl ListingError {
    pub fn transport<S: Into<String>>(detail: S) -> Self {
        Self::Transport(detail.into())
    }

    pub fn malformed<S: Into<String>>(detail: S) -> Self {
        Self::Malformed(detail.into())
    }

    /// Text handed to the render collaborator.
    ///
    /// Application messages are surfaced verbatim; transport failures get a
    /// generic message since their detail is only useful in the log.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
            Self::Application { message, .. } => message.clone(),
            Self::Malformed(detail) => format!("Malformed directory listing: {detail}"),
        }
    }
}

/// Unified error type for everything outside a single listing round trip.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not determine the config directory")]
    ConfigDirUnavailable,

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    pub fn invalid_input<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn terminal<S: Into<String>>(step: S, source: impl std::fmt::Display) -> Self {
        Self::Terminal(format!("{}: {source}", step.into()))
    }
}
