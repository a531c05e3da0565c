use serde::{Deserialize, Serialize};

/// Error body the service returns alongside a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error_code: i64,
    pub error_msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

impl ApiError {
    /// Decodes an error body, returning `None` if it is not one.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}

/// Error codes with client-side meaning.
pub mod codes {
    /// The requested file or directory does not exist.
    pub const FILE_NOT_EXISTS: i64 = 31066;
    /// A rapid upload found no stored content with the given digest.
    pub const RAPID_UPLOAD_NO_MATCH: i64 = 31079;
}
