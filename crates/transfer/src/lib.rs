//! Local side of PCS transfers: chunk planning, block manifests, range
//! reads and rapid-upload digests.
//!
//! Nothing here talks to the network; the client crate drives these types
//! one chunk at a time.

mod chunked;
mod digest;
mod plan;
mod types;
mod validation;

pub use chunked::RangeReader;
pub use digest::{DigestResult, digest_file, digest_reader};
pub use plan::{ChunkPlan, adaptive_chunk_size};
pub use types::{BlockManifest, ByteRange};
pub use validation::validate_remote_path;

pub use pcs_protocol::constants::{DEFAULT_CHUNK_SIZE, MAX_BLOCK_COUNT, RAPID_UPLOAD_SLICE_SIZE};

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error(
        "{size} bytes need more than {max_chunks} chunks of {chunk_size} bytes"
    )]
    ChunkCountExceeded {
        size: u64,
        chunk_size: u64,
        max_chunks: u64,
    },

    #[error("source ended at offset {offset}: expected {expected} bytes, read {actual}")]
    ShortRead {
        offset: u64,
        expected: u64,
        actual: u64,
    },

    #[error("invalid path: {0}")]
    InvalidPath(String),
}
