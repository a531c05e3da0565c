//! Quota, metadata and directory operations on the `file` endpoint.

use pcs_protocol::constants::method;
use pcs_protocol::messages::{FromTo, FromToListParam, PathListParam};
use pcs_protocol::{
    CreatedDir, DiffResult, Endpoint, FileList, FileMeta, QuotaInfo, RelocationResult,
    RequestAck, SortBy, SortOrder,
};
use pcs_transfer::validate_remote_path;

use crate::Error;
use crate::client::{Client, json_param};

/// Optional parameters of [`Client::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub by: Option<SortBy>,
    pub order: Option<SortOrder>,
    /// Half-open entry window `(start, end)`, sent as `start-end`.
    pub limit: Option<(u64, u64)>,
}

impl Client {
    /// Storage quota of the account.
    pub async fn quota_info(&self) -> Result<QuotaInfo, Error> {
        self.call("quota", self.get(Endpoint::Quota, method::INFO)).await
    }

    /// Metadata of a single file or directory.
    ///
    /// A path the service does not know yields [`Error::NotFound`].
    pub async fn meta_one(&self, path: &str) -> Result<FileMeta, Error> {
        validate_remote_path(path)?;
        let req = self.get(Endpoint::File, method::META).query("path", path);
        let list: FileList = match self.call("meta", req).await {
            Ok(list) => list,
            Err(e) if e.is_not_found() => return Err(Error::NotFound(path.to_string())),
            Err(e) => return Err(e),
        };
        list.list
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }

    /// Metadata of several paths in one request.
    pub async fn meta_many(&self, paths: &[&str]) -> Result<FileList, Error> {
        for path in paths {
            validate_remote_path(path)?;
        }
        let param = json_param(&PathListParam::new(paths.iter().copied()))?;
        let req = self.post(Endpoint::File, method::META).param(param);
        self.call("meta", req).await
    }

    pub async fn mkdir(&self, path: &str) -> Result<CreatedDir, Error> {
        validate_remote_path(path)?;
        let req = self.post(Endpoint::File, method::MKDIR).query("path", path);
        self.call("mkdir", req).await
    }

    /// Lists a directory.
    pub async fn list(&self, path: &str, options: &ListOptions) -> Result<FileList, Error> {
        validate_remote_path(path)?;
        let req = self
            .get(Endpoint::File, method::LIST)
            .query("path", path)
            .query_opt("by", options.by.map(SortBy::as_str))
            .query_opt("order", options.order.map(SortOrder::as_str))
            .query_opt(
                "limit",
                options.limit.map(|(start, end)| format!("{start}-{end}")),
            );
        self.call("list", req).await
    }

    pub async fn move_one(&self, from: &str, to: &str) -> Result<RelocationResult, Error> {
        self.relocate_one(method::MOVE, from, to).await
    }

    /// Moves several entries; `pairs` are `(from, to)`.
    pub async fn move_many(&self, pairs: &[(&str, &str)]) -> Result<RelocationResult, Error> {
        self.relocate_many(method::MOVE, pairs).await
    }

    pub async fn copy_one(&self, from: &str, to: &str) -> Result<RelocationResult, Error> {
        self.relocate_one(method::COPY, from, to).await
    }

    /// Copies several entries; `pairs` are `(from, to)`.
    pub async fn copy_many(&self, pairs: &[(&str, &str)]) -> Result<RelocationResult, Error> {
        self.relocate_many(method::COPY, pairs).await
    }

    /// Moves a file or directory to the recycle bin.
    pub async fn delete_one(&self, path: &str) -> Result<RequestAck, Error> {
        validate_remote_path(path)?;
        let req = self.post(Endpoint::File, method::DELETE).query("path", path);
        self.call("delete", req).await
    }

    pub async fn delete_many(&self, paths: &[&str]) -> Result<RequestAck, Error> {
        for path in paths {
            validate_remote_path(path)?;
        }
        let param = json_param(&PathListParam::new(paths.iter().copied()))?;
        let req = self.post(Endpoint::File, method::DELETE).param(param);
        self.call("delete", req).await
    }

    /// Searches `path` for names containing `keyword`, descending into
    /// subdirectories when `recursive` is set.
    pub async fn search(
        &self,
        path: &str,
        keyword: &str,
        recursive: bool,
    ) -> Result<FileList, Error> {
        validate_remote_path(path)?;
        let req = self
            .get(Endpoint::File, method::SEARCH)
            .query("path", path)
            .query("wd", keyword)
            .query("re", u8::from(recursive));
        self.call("search", req).await
    }

    /// Changes since `cursor`; `None` starts from the beginning.
    pub async fn diff(&self, cursor: Option<&str>) -> Result<DiffResult, Error> {
        let req = self
            .get(Endpoint::File, method::DIFF)
            .query("cursor", cursor.unwrap_or("null"));
        self.call("diff", req).await
    }

    async fn relocate_one(
        &self,
        method: &'static str,
        from: &str,
        to: &str,
    ) -> Result<RelocationResult, Error> {
        validate_remote_path(from)?;
        validate_remote_path(to)?;
        let req = self
            .post(Endpoint::File, method)
            .query("from", from)
            .query("to", to);
        self.call(method, req).await
    }

    async fn relocate_many(
        &self,
        method: &'static str,
        pairs: &[(&str, &str)],
    ) -> Result<RelocationResult, Error> {
        let mut list = Vec::with_capacity(pairs.len());
        for (from, to) in pairs {
            validate_remote_path(from)?;
            validate_remote_path(to)?;
            list.push(FromTo {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        let param = json_param(&FromToListParam { list })?;
        let req = self.post(Endpoint::File, method).param(param);
        self.call(method, req).await
    }
}
