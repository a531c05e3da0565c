//! Upload pipeline: single-shot for small sources, staged blocks plus
//! superfile assembly for everything larger than one chunk.

use std::path::Path;

use pcs_protocol::constants::method;
use pcs_protocol::{Endpoint, OnDup, TmpBlock, UploadedFile};
use pcs_transfer::{BlockManifest, ChunkPlan, RangeReader, validate_remote_path};
use tokio::io::{AsyncRead, AsyncSeek};
use tracing::{debug, info, warn};

use crate::Error;
use crate::client::{Client, remote_name};

impl Client {
    /// Uploads a local file to `remote`.
    ///
    /// Files up to the configured chunk size go up in one request; larger
    /// files are staged block by block and assembled server-side.
    pub async fn upload(
        &self,
        remote: &str,
        local: &Path,
        ondup: OnDup,
    ) -> Result<UploadedFile, Error> {
        validate_remote_path(remote)?;
        let source = RangeReader::open(local).await?;
        self.upload_from(remote, source, ondup).await
    }

    /// Uploads from any seekable source of known size.
    pub async fn upload_from<R>(
        &self,
        remote: &str,
        mut source: RangeReader<R>,
        ondup: OnDup,
    ) -> Result<UploadedFile, Error>
    where
        R: AsyncRead + AsyncSeek + Unpin + Send,
    {
        validate_remote_path(remote)?;
        let size = source.size();
        let config = self.config();

        if size <= config.chunk_size {
            let data = source.read_all().await?;
            let stored = self.upload_bytes(remote, data, ondup).await?;
            info!(path = %stored.path, size, "uploaded");
            return Ok(stored);
        }

        let plan = ChunkPlan::adaptive(size, config.chunk_size, config.max_chunks)?;
        debug!(
            path = %remote,
            size,
            chunk_size = plan.chunk_size(),
            blocks = plan.len(),
            "staged upload planned"
        );

        let manifest = match self.stage_blocks(&mut source, &plan).await {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(path = %remote, error = %e, "staged upload aborted");
                return Err(e);
            }
        };

        let stored = self.create_superfile(remote, manifest, ondup).await?;
        info!(path = %stored.path, size, blocks = plan.len(), "uploaded");
        Ok(stored)
    }

    /// Uploads a local file in a single request regardless of its size.
    pub async fn upload_single(
        &self,
        remote: &str,
        local: &Path,
        ondup: OnDup,
    ) -> Result<UploadedFile, Error> {
        validate_remote_path(remote)?;
        let data = tokio::fs::read(local).await?;
        self.upload_bytes(remote, data, ondup).await
    }

    /// Stores `data` at `remote` in a single request.
    pub async fn upload_bytes(
        &self,
        remote: &str,
        data: Vec<u8>,
        ondup: OnDup,
    ) -> Result<UploadedFile, Error> {
        validate_remote_path(remote)?;
        let req = self
            .post(Endpoint::File, method::UPLOAD)
            .query("path", remote)
            .query("ondup", ondup)
            .multipart(remote_name(remote), data);
        self.call("upload", req).await
    }

    /// Stages one temporary block; the returned checksum goes into the
    /// block manifest.
    pub async fn upload_tmp_block(&self, data: Vec<u8>) -> Result<TmpBlock, Error> {
        let req = self
            .post(Endpoint::File, method::UPLOAD)
            .query("type", "tmpfile")
            .multipart("block", data);
        self.call("upload tmpfile", req).await
    }

    /// Stages every range of `plan`, in order, one request at a time.
    ///
    /// The first failure aborts; blocks staged before it are abandoned.
    pub async fn stage_blocks<R>(
        &self,
        source: &mut RangeReader<R>,
        plan: &ChunkPlan,
    ) -> Result<BlockManifest, Error>
    where
        R: AsyncRead + AsyncSeek + Unpin + Send,
    {
        let mut manifest = BlockManifest::with_capacity(plan.len());
        for (index, range) in plan.iter().enumerate() {
            let data = source.read_range(*range).await?;
            let block = self.upload_tmp_block(data).await?;
            debug!(
                index,
                offset = range.offset,
                len = range.len,
                md5 = %block.md5,
                "staged block"
            );
            manifest.push(block.md5);
        }
        Ok(manifest)
    }

    /// Assembles staged blocks into the file at `remote`.
    pub async fn create_superfile(
        &self,
        remote: &str,
        manifest: BlockManifest,
        ondup: OnDup,
    ) -> Result<UploadedFile, Error> {
        validate_remote_path(remote)?;
        let req = self
            .post(Endpoint::File, method::CREATE_SUPERFILE)
            .query("path", remote)
            .query("ondup", ondup)
            .param(manifest.to_param()?);
        self.call("createsuperfile", req).await
    }
}
