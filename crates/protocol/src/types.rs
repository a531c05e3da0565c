use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata returned after a file is stored (single upload, superfile, rapid upload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub path: String,
    pub size: u64,
    pub ctime: u64,
    pub mtime: u64,
    pub md5: String,
    pub fs_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// Response to a temporary block upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmpBlock {
    /// MD5 of the staged bytes, as computed by the server.
    pub md5: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// Storage quota of the authorised account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaInfo {
    pub quota: u64,
    pub used: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

impl QuotaInfo {
    pub fn available(&self) -> u64 {
        self.quota.saturating_sub(self.used)
    }
}

/// One entry of `meta`, `list`, `search` and `listrecycle` responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub fs_id: u64,
    pub path: String,
    pub size: u64,
    #[serde(with = "flag")]
    pub isdir: bool,
    #[serde(default)]
    pub ctime: u64,
    #[serde(default)]
    pub mtime: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    /// JSON-encoded block checksums (only on `meta`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifhassubdir: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filenum: Option<u64>,
}

impl FileMeta {
    pub fn is_dir(&self) -> bool {
        self.isdir
    }

    /// Final path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// A `{"list": [...]}` response of file entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileList {
    pub list: Vec<FileMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// Response to `mkdir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDir {
    pub fs_id: u64,
    pub path: String,
    #[serde(default)]
    pub ctime: u64,
    #[serde(default)]
    pub mtime: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// A single `from -> to` pair reported by `move`/`copy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relocation {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationList {
    pub list: Vec<Relocation>,
}

/// Response to `move` and `copy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationResult {
    pub extra: RelocationList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// Response carrying nothing but the request id (`delete`, `cancel_task`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestAck {
    pub request_id: u64,
}

/// One changed entry reported by `diff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub fs_id: u64,
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, with = "flag")]
    pub isdir: bool,
    #[serde(default)]
    pub isdelete: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(default)]
    pub ctime: u64,
    #[serde(default)]
    pub mtime: u64,
}

impl DiffEntry {
    pub fn is_deleted(&self) -> bool {
        self.isdelete != 0
    }
}

/// Response to `diff`; feed `cursor` into the next call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    #[serde(default)]
    pub entries: BTreeMap<String, DiffEntry>,
    pub has_more: bool,
    pub reset: bool,
    pub cursor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// One entry of a `stream` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEntry {
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub ctime: u64,
    #[serde(default)]
    pub mtime: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(default)]
    pub fs_id: u64,
}

/// Response to a `stream` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamList {
    pub total: u64,
    pub start: u64,
    pub limit: u64,
    pub list: Vec<StreamEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoredEntry {
    pub fs_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoredList {
    pub list: Vec<RestoredEntry>,
}

/// Response to `restore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<RestoredList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// Serde adapter for the service's `0`/`1` boolean flags.
mod flag {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        struct FlagVisitor;

        impl Visitor<'_> for FlagVisitor {
            type Value = bool;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("0, 1 or a boolean")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
                Ok(v)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
                match v {
                    0 => Ok(false),
                    1 => Ok(true),
                    _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
                match v {
                    0 => Ok(false),
                    1 => Ok(true),
                    _ => Err(E::invalid_value(Unexpected::Signed(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}
