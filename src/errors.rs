use std::io;

use thiserror::Error;

/// Failures raised by the local and remote record stores.
///
/// The data-access adapter never hands these to its callers; they are logged
/// and answered with a fallback. Store implementations and connection tests
/// do surface them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Remote store returned HTTP {status}{}: {message}", code_suffix(.code))]
    Remote {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("Remote store unreachable: {0}")]
    Transport(String),
    #[error("Remote store returned no row for `{0}`")]
    MissingRow(String),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|code| format!(" ({code})"))
        .unwrap_or_default()
}

/// PostgREST reports an undefined table with this SQLSTATE.
pub const MISSING_TABLE_CODE: &str = "42P01";

impl StoreError {
    /// True when the remote backend answered but the expected tables are absent.
    pub fn is_missing_table(&self) -> bool {
        matches!(self, StoreError::Remote { code: Some(code), .. } if code == MISSING_TABLE_CODE)
    }

    /// True when the remote backend rejected the anonymous key.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            StoreError::Remote {
                status, message, ..
            } => *status == 401 || message.contains("JWT"),
            _ => false,
        }
    }
}

/// Failures from the language-model request layer.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Model API key is not configured")]
    MissingApiKey,
    #[error("Model request failed: {0}")]
    Transport(String),
    #[error("Model returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Model returned an empty response")]
    EmptyResponse,
    #[error("Model response could not be parsed: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while loading or saving user configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Errors raised by the workflow services layered on top of the adapter.
#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    #[error("{0}")]
    Invalid(String),
    #[error("{kind} `{id}` not found")]
    NotFound { kind: &'static str, id: String },
}
