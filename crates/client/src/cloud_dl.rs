//! Offline download tasks (`services/cloud_dl`).

use pcs_protocol::constants::method;
use pcs_protocol::messages::{AddedTask, TaskList, TaskQuery};
use pcs_protocol::{Endpoint, RequestAck, TaskQueryKind};
use pcs_transfer::validate_remote_path;
use tracing::info;

use crate::Error;
use crate::client::Client;

/// A server-side download of `source_url` into `save_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub save_path: String,
    pub source_url: String,
    /// Bytes per second.
    pub rate_limit: Option<u64>,
    /// Seconds.
    pub timeout: Option<u64>,
    pub callback: Option<String>,
    pub expires: Option<u64>,
}

impl NewTask {
    pub fn new(save_path: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            save_path: save_path.into(),
            source_url: source_url.into(),
            rate_limit: None,
            timeout: None,
            callback: None,
            expires: None,
        }
    }
}

/// Filters and paging for [`Client::list_task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTaskOptions {
    pub start: u64,
    pub limit: u64,
    /// Oldest first instead of newest first.
    pub asc: bool,
    pub need_task_info: bool,
    pub source_url: Option<String>,
    pub save_path: Option<String>,
    pub create_time: Option<u64>,
    pub status: Option<u64>,
    pub expires: Option<u64>,
}

impl Default for ListTaskOptions {
    fn default() -> Self {
        Self {
            start: 0,
            limit: 10,
            asc: false,
            need_task_info: true,
            source_url: None,
            save_path: None,
            create_time: None,
            status: None,
            expires: None,
        }
    }
}

impl Client {
    pub async fn add_task(&self, task: &NewTask) -> Result<AddedTask, Error> {
        validate_remote_path(&task.save_path)?;
        let req = self
            .post(Endpoint::CloudDl, method::ADD_TASK)
            .query("save_path", &task.save_path)
            .query("source_url", &task.source_url)
            .query_opt("rate_limit", task.rate_limit)
            .query_opt("timeout", task.timeout)
            .query_opt("callback", task.callback.as_deref())
            .query_opt("expires", task.expires);
        let added: AddedTask = self.call("add_task", req).await?;
        info!(task_id = added.task_id, save_path = %task.save_path, "offline task added");
        Ok(added)
    }

    /// Status of the given tasks, keyed by task id.
    pub async fn query_task(
        &self,
        task_ids: &[u64],
        kind: TaskQueryKind,
    ) -> Result<TaskQuery, Error> {
        let ids = task_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let req = self
            .post(Endpoint::CloudDl, method::QUERY_TASK)
            .query("task_ids", ids)
            .query("op_type", kind.op_type());
        self.call("query_task", req).await
    }

    pub async fn list_task(&self, options: &ListTaskOptions) -> Result<TaskList, Error> {
        let req = self
            .post(Endpoint::CloudDl, method::LIST_TASK)
            .query("start", options.start)
            .query("limit", options.limit)
            .query("asc", u8::from(options.asc))
            .query("need_task_info", u8::from(options.need_task_info))
            .query_opt("source_url", options.source_url.as_deref())
            .query_opt("save_path", options.save_path.as_deref())
            .query_opt("create_time", options.create_time)
            .query_opt("status", options.status)
            .query_opt("expires", options.expires);
        self.call("list_task", req).await
    }

    pub async fn cancel_task(&self, task_id: u64) -> Result<RequestAck, Error> {
        let req = self
            .post(Endpoint::CloudDl, method::CANCEL_TASK)
            .query("task_id", task_id);
        self.call("cancel_task", req).await
    }
}
