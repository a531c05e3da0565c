//! Rapid upload: registering content the service already stores.

use std::path::Path;

use pcs_protocol::constants::method;
use pcs_protocol::{Endpoint, OnDup, UploadedFile};
use pcs_transfer::{DigestResult, digest_file, validate_remote_path};
use tracing::{debug, info};

use crate::Error;
use crate::client::Client;

impl Client {
    /// Stores `remote` by content fingerprint without sending any bytes.
    ///
    /// When the service holds no matching content the call fails with an
    /// error for which [`Error::is_rapid_upload_miss`] is true; falling back
    /// to [`Client::upload`] is up to the caller.
    pub async fn rapid_upload(
        &self,
        remote: &str,
        digest: &DigestResult,
        ondup: OnDup,
    ) -> Result<UploadedFile, Error> {
        validate_remote_path(remote)?;
        let req = self
            .post(Endpoint::File, method::RAPID_UPLOAD)
            .query("path", remote)
            .query("content-length", digest.content_length)
            .query("content-md5", &digest.content_md5)
            .query("slice-md5", &digest.slice_md5)
            .query("content-crc32", &digest.content_crc32)
            .query("ondup", ondup);
        let stored: UploadedFile = self.call("rapidupload", req).await?;
        info!(path = %stored.path, size = stored.size, "rapid upload matched");
        Ok(stored)
    }

    /// Digests a local file and attempts a rapid upload of it.
    pub async fn rapid_upload_file(
        &self,
        remote: &str,
        local: &Path,
        ondup: OnDup,
    ) -> Result<UploadedFile, Error> {
        validate_remote_path(remote)?;
        let local = local.to_path_buf();
        let digest = tokio::task::spawn_blocking(move || digest_file(&local)).await??;
        debug!(
            path = %remote,
            length = digest.content_length,
            md5 = %digest.content_md5,
            "digested for rapid upload"
        );
        self.rapid_upload(remote, &digest, ondup).await
    }
}
