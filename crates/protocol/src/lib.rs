//! Request enums and response records for the PCS REST API.
//!
//! Responses are decoded into explicit records; fields the control flow
//! depends on are required, everything else is optional.

pub mod constants;
pub mod envelope;
pub mod messages;
pub mod types;

// Re-export primary types for convenience.
pub use constants::{Endpoint, OnDup, SortBy, SortOrder, StreamType, TaskQueryKind};
pub use envelope::ApiError;
pub use types::{
    CreatedDir, DiffEntry, DiffResult, FileList, FileMeta, QuotaInfo, RelocationResult,
    RequestAck, RestoreResult, StreamEntry, StreamList, TmpBlock, UploadedFile,
};
