use std::fmt;

use serde::{Deserialize, Serialize};

/// Default REST root of the PCS service.
pub const DEFAULT_BASE_URL: &str = "https://pcs.baidu.com/rest/2.0/pcs";

/// Default chunk size for staged uploads and ranged downloads (4 MiB).
pub const DEFAULT_CHUNK_SIZE: u64 = 4 * 1024 * 1024;

/// Maximum number of temporary blocks a `createsuperfile` call accepts.
pub const MAX_BLOCK_COUNT: u64 = 1024;

/// Read unit for rapid-upload digests; the slice hash covers exactly one unit.
pub const RAPID_UPLOAD_SLICE_SIZE: usize = 256 * 1024;

/// Longest remote path the service accepts, in bytes.
pub const MAX_PATH_LEN: usize = 1000;

/// REST resource an operation is issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    File,
    Quota,
    Thumbnail,
    Stream,
    CloudDl,
}

impl Endpoint {
    /// Path of the resource relative to the REST root.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::File => "/file",
            Endpoint::Quota => "/quota",
            Endpoint::Thumbnail => "/thumbnail",
            Endpoint::Stream => "/stream",
            Endpoint::CloudDl => "/services/cloud_dl",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Values of the `method` query parameter.
pub mod method {
    pub const INFO: &str = "info";
    pub const UPLOAD: &str = "upload";
    pub const DOWNLOAD: &str = "download";
    pub const CREATE_SUPERFILE: &str = "createsuperfile";
    pub const RAPID_UPLOAD: &str = "rapidupload";
    pub const META: &str = "meta";
    pub const MKDIR: &str = "mkdir";
    pub const LIST: &str = "list";
    pub const MOVE: &str = "move";
    pub const COPY: &str = "copy";
    pub const DELETE: &str = "delete";
    pub const SEARCH: &str = "search";
    pub const DIFF: &str = "diff";
    pub const STREAMING: &str = "streaming";
    pub const GENERATE: &str = "generate";
    pub const ADD_TASK: &str = "add_task";
    pub const QUERY_TASK: &str = "query_task";
    pub const LIST_TASK: &str = "list_task";
    pub const CANCEL_TASK: &str = "cancel_task";
    pub const LIST_RECYCLE: &str = "listrecycle";
    pub const RESTORE: &str = "restore";
}

/// Conflict policy applied by the server when the target path exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnDup {
    #[default]
    Overwrite,
    Skip,
    Newcopy,
}

impl OnDup {
    pub fn as_str(self) -> &'static str {
        match self {
            OnDup::Overwrite => "overwrite",
            OnDup::Skip => "skip",
            OnDup::Newcopy => "newcopy",
        }
    }
}

impl fmt::Display for OnDup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort key for directory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    Time,
    Size,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Time => "time",
            SortBy::Size => "size",
        }
    }
}

/// Sort direction for directory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Media category served by the `stream` endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Video,
    Audio,
    #[default]
    Image,
    Doc,
}

impl StreamType {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamType::Video => "video",
            StreamType::Audio => "audio",
            StreamType::Image => "image",
            StreamType::Doc => "doc",
        }
    }
}

/// What `query_task` reports about each offline-download task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskQueryKind {
    /// Task definition (source, save path, timestamps).
    Info,
    /// Transfer progress (sizes, status).
    #[default]
    Progress,
}

impl TaskQueryKind {
    /// Wire value of the `op_type` parameter.
    pub fn op_type(self) -> u8 {
        match self {
            TaskQueryKind::Info => 0,
            TaskQueryKind::Progress => 1,
        }
    }
}

/// Default transcoding profile for `streaming`.
pub const DEFAULT_STREAMING_TYPE: &str = "M3U8_320_240";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ondup_wire_values() {
        assert_eq!(OnDup::default(), OnDup::Overwrite);
        assert_eq!(OnDup::Newcopy.to_string(), "newcopy");
        assert_eq!(serde_json::to_string(&OnDup::Skip).unwrap(), "\"skip\"");
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::File.path(), "/file");
        assert_eq!(Endpoint::CloudDl.to_string(), "/services/cloud_dl");
    }

    #[test]
    fn task_query_op_type() {
        assert_eq!(TaskQueryKind::Info.op_type(), 0);
        assert_eq!(TaskQueryKind::default().op_type(), 1);
    }

    #[test]
    fn block_ceiling_covers_four_gib_at_default_chunk() {
        assert_eq!(DEFAULT_CHUNK_SIZE * MAX_BLOCK_COUNT, 4 * 1024 * 1024 * 1024);
    }
}
