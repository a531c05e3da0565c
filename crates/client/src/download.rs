//! Download pipeline and raw ranged reads.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use pcs_protocol::constants::method;
use pcs_protocol::{Endpoint, FileMeta};
use pcs_transfer::{ByteRange, ChunkPlan, validate_remote_path};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::Error;
use crate::client::{Client, remote_name};
use crate::transport::{Response, STATUS_OK, STATUS_PARTIAL_CONTENT};

/// Byte range of a raw read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadRange {
    /// The whole file; no `Range` header is sent.
    #[default]
    Full,
    /// From `start` to the end of the file.
    From(u64),
    /// `start..=end`, both inclusive.
    Span { start: u64, end: u64 },
}

impl ReadRange {
    /// Value of the `Range` header, if one is needed.
    pub fn header_value(self) -> Option<String> {
        match self {
            ReadRange::Full => None,
            ReadRange::From(start) => Some(format!("bytes={start}-")),
            ReadRange::Span { start, end } => Some(format!("bytes={start}-{end}")),
        }
    }
}

impl Client {
    /// Reads a file, or part of it, into memory.
    pub async fn read(&self, path: &str, range: ReadRange) -> Result<Vec<u8>, Error> {
        self.read_stream(path, range).await?.bytes().await
    }

    /// Starts a read and hands back the streamed response.
    ///
    /// Any 2xx status is accepted; callers that need a partial response
    /// check [`Response::status`] themselves.
    pub async fn read_stream(&self, path: &str, range: ReadRange) -> Result<Response, Error> {
        validate_remote_path(path)?;
        let mut req = self
            .get(Endpoint::File, method::DOWNLOAD)
            .query("path", path);
        if let Some(value) = range.header_value() {
            req = req.range(value);
        }
        self.send_checked(req).await
    }

    /// Downloads `path` into `sink` and returns the remote metadata.
    ///
    /// Files up to the configured chunk size are fetched in one request.
    /// Larger files are fetched one range at a time, in order; each range
    /// must come back as `206 Partial Content` with exactly the requested
    /// length. On failure the sink holds whatever was written before it.
    pub async fn download<W>(&self, path: &str, sink: &mut W) -> Result<FileMeta, Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let meta = self.file_meta(path).await?;
        self.download_with_meta(path, meta, sink).await
    }

    /// Downloads `path` to a local file, named after the remote file when
    /// `local` is `None`. Returns the local path written.
    ///
    /// The local file is only created once the remote path is known to be
    /// a regular file.
    pub async fn download_to_file(
        &self,
        path: &str,
        local: Option<&Path>,
    ) -> Result<PathBuf, Error> {
        validate_remote_path(path)?;
        let meta = self.file_meta(path).await?;
        let target = match local {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(remote_name(path)),
        };
        let mut file = tokio::fs::File::create(&target).await?;
        self.download_with_meta(path, meta, &mut file).await?;
        Ok(target)
    }

    async fn file_meta(&self, path: &str) -> Result<FileMeta, Error> {
        let meta = self.meta_one(path).await?;
        if meta.is_dir() {
            return Err(Error::NotAFile(path.to_string()));
        }
        Ok(meta)
    }

    async fn download_with_meta<W>(
        &self,
        path: &str,
        meta: FileMeta,
        sink: &mut W,
    ) -> Result<FileMeta, Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let chunk_size = self.config().chunk_size;
        let result = if meta.size <= chunk_size {
            self.download_whole(path, sink).await
        } else {
            self.download_ranges(path, meta.size, chunk_size, sink).await
        };

        match result {
            Ok(written) => {
                sink.flush().await?;
                info!(path, size = meta.size, written, "downloaded");
                Ok(meta)
            }
            Err(e) => {
                warn!(path, error = %e, "download aborted");
                Err(e)
            }
        }
    }

    async fn download_whole<W>(&self, path: &str, sink: &mut W) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let resp = self.read_stream(path, ReadRange::Full).await?;
        if resp.status != STATUS_OK {
            return Err(Error::UnexpectedStatus {
                expected: STATUS_OK,
                status: resp.status,
            });
        }

        let mut body = resp.into_stream();
        let mut written = 0u64;
        while let Some(piece) = body.next().await {
            let piece = piece?;
            sink.write_all(&piece).await?;
            written += piece.len() as u64;
        }
        Ok(written)
    }

    async fn download_ranges<W>(
        &self,
        path: &str,
        size: u64,
        chunk_size: u64,
        sink: &mut W,
    ) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let plan = ChunkPlan::partition(size, chunk_size)?;
        debug!(path, size, chunk_size, ranges = plan.len(), "ranged download planned");

        let mut written = 0u64;
        for range in &plan {
            let data = self.fetch_range(path, *range).await?;
            sink.write_all(&data).await?;
            written += data.len() as u64;
            debug!(offset = range.offset, len = range.len, "fetched range");
        }
        Ok(written)
    }

    async fn fetch_range(&self, path: &str, range: ByteRange) -> Result<Vec<u8>, Error> {
        let Some(end) = range.last_byte() else {
            return Ok(Vec::new());
        };
        let resp = self
            .read_stream(path, ReadRange::Span { start: range.offset, end })
            .await?;
        if resp.status != STATUS_PARTIAL_CONTENT {
            return Err(Error::IncompletePartialResponse {
                offset: range.offset,
                status: resp.status,
            });
        }

        let data = resp.bytes().await?;
        if data.len() as u64 != range.len {
            return Err(Error::RangeLengthMismatch {
                offset: range.offset,
                expected: range.len,
                received: data.len() as u64,
            });
        }
        Ok(data)
    }
}
