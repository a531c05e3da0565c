use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// `param` form payloads for batch requests
// ---------------------------------------------------------------------------

/// Payload of `createsuperfile`: block checksums in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperfileParam {
    pub block_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathItem {
    pub path: String,
}

/// Payload of batch `meta` and `delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathListParam {
    pub list: Vec<PathItem>,
}

impl PathListParam {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            list: paths
                .into_iter()
                .map(|p| PathItem { path: p.into() })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromTo {
    pub from: String,
    pub to: String,
}

/// Payload of batch `move` and `copy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromToListParam {
    pub list: Vec<FromTo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsIdItem {
    pub fs_id: u64,
}

/// Payload of batch `restore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsIdListParam {
    pub list: Vec<FsIdItem>,
}

// ---------------------------------------------------------------------------
// Offline download (`services/cloud_dl`)
// ---------------------------------------------------------------------------

/// Response to `add_task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedTask {
    #[serde(with = "lenient::int")]
    pub task_id: u64,
    /// `1` when the server already had the content and finished immediately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rapid_download: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// A file produced by a finished task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFile {
    pub file_name: String,
    #[serde(default, with = "lenient::opt_int")]
    pub file_size: Option<u64>,
}

/// Per-task record of `query_task`. Which fields are present depends on
/// the query kind, so all of them are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    #[serde(default, with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub status: Option<u64>,
    #[serde(default, with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub finished_size: Option<u64>,
    #[serde(default, with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<u64>,
    #[serde(default, with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    #[serde(default, with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_list: Option<Vec<TaskFile>>,
}

/// Response to `query_task`, keyed by task id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery {
    pub task_info: std::collections::BTreeMap<String, TaskInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// One row of `list_task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    #[serde(with = "lenient::int")]
    pub task_id: u64,
    #[serde(default, with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub status: Option<u64>,
    #[serde(default, with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
}

/// Response to `list_task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    #[serde(default)]
    pub task_info: Vec<TaskSummary>,
    #[serde(with = "lenient::int")]
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// `cloud_dl` reports most integers as decimal strings; accept both forms.
mod lenient {
    use serde::Deserialize;
    use serde::de;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(u64),
        Str(String),
    }

    fn to_u64<E: de::Error>(raw: NumOrStr) -> Result<u64, E> {
        match raw {
            NumOrStr::Num(n) => Ok(n),
            NumOrStr::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected an integer, got {s:?}"))),
        }
    }

    pub mod int {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_u64(*value)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
            super::to_u64(super::NumOrStr::deserialize(deserializer)?)
        }
    }

    pub mod opt_int {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<u64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => serializer.serialize_some(v),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<u64>, D::Error> {
            match Option::<super::NumOrStr>::deserialize(deserializer)? {
                Some(super::NumOrStr::Str(s)) if s.is_empty() => Ok(None),
                Some(raw) => super::to_u64(raw).map(Some),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superfile_param_shape() {
        let param = SuperfileParam {
            block_list: vec!["a".into(), "b".into()],
        };
        assert_eq!(
            serde_json::to_string(&param).unwrap(),
            r#"{"block_list":["a","b"]}"#
        );
    }

    #[test]
    fn path_list_param_shape() {
        let param = PathListParam::new(["/apps/x/a", "/apps/x/b"]);
        assert_eq!(
            serde_json::to_string(&param).unwrap(),
            r#"{"list":[{"path":"/apps/x/a"},{"path":"/apps/x/b"}]}"#
        );
    }

    #[test]
    fn task_query_accepts_string_numbers() {
        let json = r#"{"task_info":{"26":{"status":"1","file_size":"1024",
            "finished_size":"512","create_time":"1400000000","start_time":"",
            "save_path":"/apps/x/a.bin","source_url":"http://example.com/a.bin"}},
            "request_id":123}"#;
        let q: TaskQuery = serde_json::from_str(json).unwrap();
        let info = &q.task_info["26"];
        assert_eq!(info.status, Some(1));
        assert_eq!(info.file_size, Some(1024));
        assert_eq!(info.start_time, None);
        assert_eq!(info.finish_time, None);
    }

    #[test]
    fn added_task_id_as_number_or_string() {
        let a: AddedTask = serde_json::from_str(r#"{"task_id":42,"request_id":1}"#).unwrap();
        let b: AddedTask = serde_json::from_str(r#"{"task_id":"42"}"#).unwrap();
        assert_eq!(a.task_id, b.task_id);
    }

    #[test]
    fn added_task_rejects_garbage_id() {
        assert!(serde_json::from_str::<AddedTask>(r#"{"task_id":"x"}"#).is_err());
    }

    #[test]
    fn task_list_total_required() {
        assert!(serde_json::from_str::<TaskList>(r#"{"task_info":[]}"#).is_err());
        let list: TaskList =
            serde_json::from_str(r#"{"task_info":[{"task_id":"7","status":"0"}],"total":"1"}"#)
                .unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.task_info[0].task_id, 7);
    }
}
