//! Recycle bin.

use pcs_protocol::constants::method;
use pcs_protocol::messages::{FsIdItem, FsIdListParam};
use pcs_protocol::{Endpoint, FileList, RequestAck, RestoreResult};
use tracing::info;

use crate::Error;
use crate::client::{Client, json_param};

impl Client {
    /// Deleted entries, `limit` at a time starting at `start`.
    pub async fn list_recycle(&self, start: u64, limit: u64) -> Result<FileList, Error> {
        let req = self
            .get(Endpoint::File, method::LIST_RECYCLE)
            .query("start", start)
            .query("limit", limit);
        self.call("listrecycle", req).await
    }

    pub async fn restore_one(&self, fs_id: u64) -> Result<RestoreResult, Error> {
        let req = self
            .post(Endpoint::File, method::RESTORE)
            .query("fs_id", fs_id);
        self.call("restore", req).await
    }

    pub async fn restore_many(&self, fs_ids: &[u64]) -> Result<RestoreResult, Error> {
        let list = fs_ids.iter().map(|&fs_id| FsIdItem { fs_id }).collect();
        let req = self
            .post(Endpoint::File, method::RESTORE)
            .param(json_param(&FsIdListParam { list })?);
        self.call("restore", req).await
    }

    /// Permanently removes everything in the recycle bin.
    pub async fn empty_recycle(&self) -> Result<RequestAck, Error> {
        let req = self
            .post(Endpoint::File, method::DELETE)
            .query("type", "recycle");
        let ack: RequestAck = self.call("empty recycle", req).await?;
        info!(request_id = ack.request_id, "recycle bin emptied");
        Ok(ack)
    }
}
