//! HTTP transport seam.
//!
//! The pipelines only see [`Transport`]; [`HttpTransport`] implements it with
//! `reqwest`, tests implement it with scripted or in-memory servers.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};
use pcs_protocol::Endpoint;
use reqwest::header::RANGE;

use crate::Error;
use crate::config::ClientConfig;

/// `200 OK`.
pub const STATUS_OK: u16 = 200;
/// `206 Partial Content`.
pub const STATUS_PARTIAL_CONTENT: u16 = 206;

/// Streamed response body.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, Error>> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    /// A single multipart file part named `file`.
    Multipart { file_name: String, data: Vec<u8> },
}

/// A request against one of the REST endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: HttpMethod,
    pub endpoint: Endpoint,
    pub query: Vec<(String, String)>,
    /// Value of the `Range` header, e.g. `bytes=0-1023`.
    pub range: Option<String>,
    pub body: Body,
}

impl Request {
    pub fn new(method: HttpMethod, endpoint: Endpoint) -> Self {
        Self {
            method,
            endpoint,
            query: Vec::new(),
            range: None,
            body: Body::Empty,
        }
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends a query parameter when a value is present.
    pub fn query_opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Sets a form body with a single `param` field.
    pub fn param(mut self, param: String) -> Self {
        self.body = Body::Form(vec![("param".into(), param)]);
        self
    }

    pub fn multipart(mut self, file_name: impl Into<String>, data: Vec<u8>) -> Self {
        self.body = Body::Multipart {
            file_name: file_name.into(),
            data,
        };
        self
    }

    /// First value of a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of the `param` form field, if any.
    pub fn form_param(&self) -> Option<&str> {
        match &self.body {
            Body::Form(fields) => fields
                .iter()
                .find(|(k, _)| k == "param")
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

/// Status plus streamed body.
pub struct Response {
    pub status: u16,
    body: BodyStream,
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Response {
    pub fn new(status: u16, body: BodyStream) -> Self {
        Self { status, body }
    }

    /// Response with an in-memory body.
    pub fn from_bytes(status: u16, body: impl Into<Bytes>) -> Self {
        let body: Bytes = body.into();
        Self::new(status, Box::pin(stream::once(async move { Ok(body) })))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Collects the whole body.
    pub async fn bytes(self) -> Result<Vec<u8>, Error> {
        let mut body = self.body;
        let mut out = Vec::new();
        while let Some(piece) = body.next().await {
            out.extend_from_slice(&piece?);
        }
        Ok(out)
    }

    pub fn into_stream(self) -> BodyStream {
        self.body
    }
}

/// Issues requests against the service.
///
/// Implementations report every status as a [`Response`]; only failures
/// below HTTP (connect, TLS, timeouts) are errors.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: Request,
    ) -> Pin<Box<dyn Future<Output = Result<Response, Error>> + Send + '_>>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn execute(&self, request: Request) -> Result<Response, Error> {
        let url = format!("{}{}", self.base_url, request.endpoint.path());
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
        }
        .query(&request.query);

        if let Some(range) = &request.range {
            builder = builder.header(RANGE, range);
        }

        builder = match request.body {
            Body::Empty => builder,
            Body::Form(fields) => builder.form(&fields),
            Body::Multipart { file_name, data } => {
                let part = reqwest::multipart::Part::bytes(data).file_name(file_name);
                builder.multipart(reqwest::multipart::Form::new().part("file", part))
            }
        };

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes_stream().map(|piece| piece.map_err(Error::from));
        Ok(Response::new(status, Box::pin(body)))
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        request: Request,
    ) -> Pin<Box<dyn Future<Output = Result<Response, Error>> + Send + '_>> {
        Box::pin(self.execute(request))
    }
}
