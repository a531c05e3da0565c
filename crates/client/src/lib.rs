//! Async client for the Baidu PCS REST API.
//!
//! The core is the transfer pipelines: staged multi-block uploads,
//! sequential ranged downloads and content-addressed rapid upload. The
//! remaining endpoints are thin typed wrappers on [`Client`].
//!
//! ```no_run
//! # async fn run() -> Result<(), pcs_client::Error> {
//! use std::path::Path;
//! use pcs_client::{Client, ClientConfig, OnDup};
//!
//! let client = Client::new(ClientConfig::new("access-token"))?;
//! let stored = client
//!     .upload("/apps/demo/video.mp4", Path::new("video.mp4"), OnDup::Overwrite)
//!     .await?;
//! println!("{} bytes, md5 {}", stored.size, stored.md5);
//! # Ok(())
//! # }
//! ```

mod client;
mod cloud_dl;
mod config;
mod download;
mod error;
mod files;
mod media;
mod rapid;
mod recycle;
mod transport;
mod upload;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use cloud_dl::{ListTaskOptions, NewTask};
pub use config::ClientConfig;
pub use download::ReadRange;
pub use error::Error;
pub use files::ListOptions;
pub use media::StreamListOptions;
pub use transport::{
    Body, BodyStream, HttpMethod, HttpTransport, Request, Response, STATUS_OK,
    STATUS_PARTIAL_CONTENT, Transport,
};

pub use pcs_protocol::messages::{AddedTask, TaskInfo, TaskList, TaskQuery, TaskSummary};
pub use pcs_protocol::{
    CreatedDir, DiffEntry, DiffResult, Endpoint, FileList, FileMeta, OnDup, QuotaInfo,
    RelocationResult, RequestAck, RestoreResult, SortBy, SortOrder, StreamEntry, StreamList,
    StreamType, TaskQueryKind, TmpBlock, UploadedFile,
};
pub use pcs_transfer::{BlockManifest, ByteRange, ChunkPlan, DigestResult, TransferError};
