//! Test transports: a scripted mock and an in-memory PCS server.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::future::Future;
use std::io::Cursor;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures_util::stream;
use pcs_protocol::Endpoint;
use pcs_protocol::messages::SuperfileParam;
use serde_json::json;

use crate::Error;
use crate::config::ClientConfig;
use crate::transport::{Body, Request, Response, Transport};
use crate::Client;

pub(crate) fn test_config(chunk_size: u64) -> ClientConfig {
    ClientConfig::new("test-token").with_chunk_size(chunk_size)
}

// ---------------------------------------------------------------------------
// MockTransport
// ---------------------------------------------------------------------------

/// Replays scripted responses in order and records every request.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Default)]
struct MockInner {
    responses: VecDeque<(u16, Vec<u8>)>,
    requests: Vec<Request>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back((status, body.into()));
        self
    }

    pub(crate) fn respond_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.respond(status, body.to_string())
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub(crate) fn client(&self) -> Client {
        Client::with_transport(test_config(4 * 1024 * 1024), self.clone()).unwrap()
    }
}

impl Transport for MockTransport {
    fn send(
        &self,
        request: Request,
    ) -> Pin<Box<dyn Future<Output = Result<Response, Error>> + Send + '_>> {
        Box::pin(async move {
            let mut inner = self.inner.lock().unwrap();
            inner.requests.push(request);
            match inner.responses.pop_front() {
                Some((status, body)) => Ok(Response::from_bytes(status, body)),
                None => Err(Error::Io(std::io::Error::other("no scripted response"))),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// FakePcs
// ---------------------------------------------------------------------------

/// In-memory stand-in for the PCS file endpoint.
///
/// Supports single uploads, temporary blocks, superfile assembly, meta,
/// plain and ranged downloads, and rapid upload. Response bodies are
/// streamed in small pieces.
#[derive(Clone, Default)]
pub(crate) struct FakePcs {
    inner: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
    blocks: HashMap<String, Vec<u8>>,
    log: Vec<Request>,
    tmpfile_calls: usize,
    fail_tmpfile_call: Option<usize>,
    ignore_ranges: bool,
    truncate_ranges: bool,
    partial_whole: bool,
}

const PIECE: usize = 64 * 1024;

impl FakePcs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn client(&self, chunk_size: u64) -> Client {
        Client::with_transport(test_config(chunk_size), self.clone()).unwrap()
    }

    pub(crate) fn put_file(&self, path: &str, data: Vec<u8>) {
        self.inner.lock().unwrap().files.insert(path.into(), data);
    }

    pub(crate) fn put_dir(&self, path: &str) {
        self.inner.lock().unwrap().dirs.insert(path.into());
    }

    pub(crate) fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.inner.lock().unwrap().files.get(path).cloned()
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.inner.lock().unwrap().log.clone()
    }

    /// Requests whose `method` query parameter equals `method`.
    pub(crate) fn calls(&self, method: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.query_value("method") == Some(method))
            .collect()
    }

    /// Makes the `n`th temporary block upload (1-based) fail with a 500.
    pub(crate) fn fail_tmpfile_call(&self, n: usize) {
        self.inner.lock().unwrap().fail_tmpfile_call = Some(n);
    }

    /// Answers ranged downloads with a full `200` body.
    pub(crate) fn ignore_ranges(&self) {
        self.inner.lock().unwrap().ignore_ranges = true;
    }

    /// Answers ranged downloads with one byte less than requested.
    pub(crate) fn truncate_ranges(&self) {
        self.inner.lock().unwrap().truncate_ranges = true;
    }

    /// Answers whole-file downloads with `206` instead of `200`.
    pub(crate) fn partial_whole_downloads(&self) {
        self.inner.lock().unwrap().partial_whole = true;
    }

    fn handle(&self, request: Request) -> Response {
        let mut state = self.inner.lock().unwrap();
        state.log.push(request.clone());

        if request.endpoint != Endpoint::File {
            return error(400, 31023, "unsupported endpoint");
        }
        let path = request.query_value("path").unwrap_or_default().to_string();

        match request.query_value("method").unwrap_or_default() {
            "upload" => {
                let Body::Multipart { data, .. } = &request.body else {
                    return error(400, 31023, "missing file part");
                };
                let data = data.clone();
                if request.query_value("type") == Some("tmpfile") {
                    state.tmpfile_calls += 1;
                    if state.fail_tmpfile_call == Some(state.tmpfile_calls) {
                        return error(500, 31021, "network error");
                    }
                    let md5 = md5_hex(&data);
                    state.blocks.insert(md5.clone(), data);
                    return ok(json!({"md5": md5, "request_id": 1}));
                }
                store(&mut state, &path, request.query_value("ondup"), data)
            }
            "createsuperfile" => {
                let Some(param) = request.form_param() else {
                    return error(400, 31023, "missing param");
                };
                let Ok(param) = serde_json::from_str::<SuperfileParam>(param) else {
                    return error(400, 31023, "bad param");
                };
                let mut data = Vec::new();
                for md5 in &param.block_list {
                    match state.blocks.get(md5) {
                        Some(block) => data.extend_from_slice(block),
                        None => return error(400, 31363, "block miss in superfile2"),
                    }
                }
                store(&mut state, &path, request.query_value("ondup"), data)
            }
            "meta" => {
                if let Some(data) = state.files.get(&path) {
                    ok(json!({"list": [{
                        "fs_id": 1, "path": path, "ctime": 1, "mtime": 1,
                        "size": data.len(), "isdir": 0, "ifhassubdir": 0,
                    }], "request_id": 1}))
                } else if state.dirs.contains(&path) {
                    ok(json!({"list": [{
                        "fs_id": 2, "path": path, "ctime": 1, "mtime": 1,
                        "size": 0, "isdir": 1, "ifhassubdir": 0,
                    }], "request_id": 1}))
                } else {
                    error(404, 31066, "file does not exist")
                }
            }
            "download" => {
                let Some(data) = state.files.get(&path) else {
                    return error(404, 31066, "file does not exist");
                };
                match request.range.as_deref().and_then(parse_range) {
                    Some((start, end)) if !state.ignore_ranges => {
                        let len = data.len() as u64;
                        if start >= len {
                            return error(416, 31000, "range not satisfiable");
                        }
                        let end = end.unwrap_or(len - 1).min(len - 1);
                        let mut slice = data[start as usize..=end as usize].to_vec();
                        if state.truncate_ranges {
                            slice.pop();
                        }
                        pieces(206, slice)
                    }
                    None if state.partial_whole => pieces(206, data.clone()),
                    _ => pieces(200, data.clone()),
                }
            }
            "rapidupload" => {
                let wanted = request.query_value("content-md5").unwrap_or_default();
                let found = state
                    .files
                    .values()
                    .find(|data| md5_hex(data) == wanted)
                    .cloned();
                match found {
                    Some(data) => store(&mut state, &path, request.query_value("ondup"), data),
                    None => error(
                        404,
                        31079,
                        "file md5 not found, you should use upload API.",
                    ),
                }
            }
            other => error(400, 31023, &format!("unsupported method {other}")),
        }
    }
}

impl Transport for FakePcs {
    fn send(
        &self,
        request: Request,
    ) -> Pin<Box<dyn Future<Output = Result<Response, Error>> + Send + '_>> {
        Box::pin(async move { Ok(self.handle(request)) })
    }
}

fn store(state: &mut FakeState, path: &str, ondup: Option<&str>, data: Vec<u8>) -> Response {
    let mut path = path.to_string();
    if state.files.contains_key(&path) {
        match ondup {
            Some("skip") => return error(400, 31061, "file already exists"),
            Some("newcopy") => path = format!("{path}(1)"),
            _ => {}
        }
    }
    let body = json!({
        "path": path, "size": data.len(), "ctime": 1, "mtime": 1,
        "md5": md5_hex(&data), "fs_id": 7, "request_id": 1,
    });
    state.files.insert(path, data);
    ok(body)
}

pub(crate) fn md5_hex(data: &[u8]) -> String {
    pcs_transfer::digest_reader(Cursor::new(data))
        .map(|d| d.content_md5)
        .unwrap_or_default()
}

fn parse_range(header: &str) -> Option<(u64, Option<u64>)> {
    let bounds = header.strip_prefix("bytes=")?;
    let (start, end) = bounds.split_once('-')?;
    let start = start.parse().ok()?;
    let end = if end.is_empty() {
        None
    } else {
        Some(end.parse().ok()?)
    };
    Some((start, end))
}

fn ok(body: serde_json::Value) -> Response {
    Response::from_bytes(200, body.to_string())
}

fn error(status: u16, code: i64, msg: &str) -> Response {
    Response::from_bytes(
        status,
        json!({"error_code": code, "error_msg": msg, "request_id": 1}).to_string(),
    )
}

fn pieces(status: u16, data: Vec<u8>) -> Response {
    let parts: Vec<Result<Bytes, Error>> = data
        .chunks(PIECE)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();
    Response::new(status, Box::pin(stream::iter(parts)))
}

/// Deterministic test content.
pub(crate) fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 253) as u8).collect()
}
