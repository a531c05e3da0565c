//! Client error types.

use pcs_protocol::envelope::{ApiError, codes};
use pcs_transfer::TransferError;

/// Errors produced by the PCS client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    #[error("malformed {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("remote path not found: {0}")]
    NotFound(String),

    #[error("remote path is a directory: {0}")]
    NotAFile(String),

    #[error("range at offset {offset} answered with status {status} instead of 206")]
    IncompletePartialResponse { offset: u64, status: u16 },

    #[error("range at offset {offset}: expected {expected} bytes, received {received}")]
    RangeLengthMismatch {
        offset: u64,
        expected: u64,
        received: u64,
    },

    #[error("expected status {expected}, got {status}")]
    UnexpectedStatus { expected: u16, status: u16 },

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// Builds an [`Error::Api`] from a status and the raw error body.
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        match ApiError::parse(body) {
            Some(err) => Error::Api {
                status,
                code: Some(err.error_code),
                message: err.error_msg,
            },
            None => Error::Api {
                status,
                code: None,
                message: String::from_utf8_lossy(body).trim().to_string(),
            },
        }
    }

    /// Service error code, if the failure carried one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => *code,
            _ => None,
        }
    }

    /// `true` if the service reported that the path does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Api { status, code, .. } => {
                *code == Some(codes::FILE_NOT_EXISTS) || (*status == 404 && code.is_none())
            }
            _ => false,
        }
    }

    /// `true` if a rapid upload failed only because the server holds no
    /// matching content; callers fall back to a regular upload.
    pub fn is_rapid_upload_miss(&self) -> bool {
        self.api_code() == Some(codes::RAPID_UPLOAD_NO_MATCH)
    }
}
