fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use pcs_protocol::messages::{AddedTask, TaskList, TaskQuery};
    use pcs_protocol::{
        ApiError, DiffResult, FileList, QuotaInfo, RelocationResult, RestoreResult, StreamList,
        TmpBlock, UploadedFile,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a recorded response body as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    fn decode<T: serde::de::DeserializeOwned>(name: &str) -> T {
        serde_json::from_value(load_fixture(name))
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"))
    }

    /// Deserializes a fixture, re-serializes it and compares the JSON values.
    ///
    /// Only valid for records whose fields are all plain JSON types; the
    /// `cloud_dl` records normalise string integers and are checked by
    /// value instead.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  service: {fixture}\n  client:  {reserialized}"
        );
    }

    // --- Transfer responses ---

    #[test]
    fn fixture_uploaded_file() {
        roundtrip_test::<UploadedFile>("uploaded_file.json");
    }

    #[test]
    fn fixture_tmp_block() {
        roundtrip_test::<TmpBlock>("tmp_block.json");
        let block: TmpBlock = decode("tmp_block.json");
        assert_eq!(block.md5.len(), 32);
    }

    #[test]
    fn fixture_error_body() {
        roundtrip_test::<ApiError>("error_body.json");
        let body = fs::read(fixtures_dir().join("error_body.json")).unwrap();
        let err = ApiError::parse(&body).unwrap();
        assert_eq!(err.error_code, pcs_protocol::envelope::codes::FILE_NOT_EXISTS);
    }

    #[test]
    fn success_bodies_are_not_errors() {
        let body = fs::read(fixtures_dir().join("uploaded_file.json")).unwrap();
        assert!(ApiError::parse(&body).is_none());
    }

    // --- File endpoint ---

    #[test]
    fn fixture_quota_info() {
        roundtrip_test::<QuotaInfo>("quota_info.json");
    }

    #[test]
    fn fixture_file_meta_list() {
        roundtrip_test::<FileList>("file_meta_list.json");

        let list: FileList = decode("file_meta_list.json");
        assert!(!list.list[0].is_dir());
        assert!(list.list[1].is_dir());
        assert_eq!(list.list[0].name(), "hello");
    }

    #[test]
    fn fixture_diff_result() {
        roundtrip_test::<DiffResult>("diff_result.json");

        let diff: DiffResult = decode("diff_result.json");
        assert!(!diff.entries["/apps/album/1.jpg"].is_deleted());
        assert!(diff.entries["/apps/album/old"].is_deleted());
    }

    #[test]
    fn fixture_relocation_result() {
        roundtrip_test::<RelocationResult>("relocation_result.json");
    }

    #[test]
    fn fixture_restore_result() {
        roundtrip_test::<RestoreResult>("restore_result.json");
    }

    #[test]
    fn fixture_stream_list() {
        roundtrip_test::<StreamList>("stream_list.json");
    }

    // --- Offline download ---

    #[test]
    fn fixture_cloud_dl_add_task() {
        let added: AddedTask = decode("cloud_dl_add_task.json");
        assert_eq!(added.task_id, 426342);
        assert_eq!(added.rapid_download, Some(0));
    }

    #[test]
    fn fixture_cloud_dl_query_task() {
        let query: TaskQuery = decode("cloud_dl_query_task.json");

        let done = &query.task_info["26"];
        assert_eq!(done.status, Some(0));
        assert_eq!(done.finished_size, done.file_size);
        assert_eq!(done.file_list.as_ref().unwrap()[0].file_size, Some(3215));

        let running = &query.task_info["27"];
        assert_eq!(running.file_size, None);
        assert_eq!(running.finished_size, Some(0));
        assert!(running.file_list.is_none());
    }

    #[test]
    fn fixture_cloud_dl_list_task() {
        let list: TaskList = decode("cloud_dl_list_task.json");
        assert_eq!(list.total, 2);
        let ids: Vec<u64> = list.task_info.iter().map(|t| t.task_id).collect();
        assert_eq!(ids, vec![26, 27]);
        assert_eq!(list.task_info[1].create_time, None);
    }
}
