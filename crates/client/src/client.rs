//! PCS client handle and shared request plumbing.

use pcs_protocol::Endpoint;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Error;
use crate::config::ClientConfig;
use crate::transport::{HttpMethod, HttpTransport, Request, Response, Transport};

/// PCS API client.
///
/// Cheap to share behind an `Arc`; transfers started from different tasks
/// run independently.
pub struct Client {
    transport: Box<dyn Transport>,
    config: ClientConfig,
}

impl Client {
    /// Creates a client that talks HTTP through `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            transport: Box::new(transport),
            config,
        })
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            transport: Box::new(transport),
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Starts a request carrying `method` and the access token.
    pub(crate) fn request(&self, http: HttpMethod, endpoint: Endpoint, method: &str) -> Request {
        Request::new(http, endpoint)
            .query("method", method)
            .query("access_token", &self.config.access_token)
    }

    pub(crate) fn get(&self, endpoint: Endpoint, method: &str) -> Request {
        self.request(HttpMethod::Get, endpoint, method)
    }

    pub(crate) fn post(&self, endpoint: Endpoint, method: &str) -> Request {
        self.request(HttpMethod::Post, endpoint, method)
    }

    pub(crate) async fn send(&self, request: Request) -> Result<Response, Error> {
        self.transport.send(request).await
    }

    /// Sends a request and fails on any non-2xx status.
    pub(crate) async fn send_checked(&self, request: Request) -> Result<Response, Error> {
        let resp = self.send(request).await?;
        if !resp.is_success() {
            let status = resp.status;
            let body = resp.bytes().await.unwrap_or_default();
            return Err(Error::from_response(status, &body));
        }
        Ok(resp)
    }

    /// Sends a request and decodes the JSON response as `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: Request,
    ) -> Result<T, Error> {
        let body = self.send_checked(request).await?.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| Error::Decode { operation, source })
    }

    /// Sends a request and returns the raw response body.
    pub(crate) async fn fetch(&self, request: Request) -> Result<Vec<u8>, Error> {
        self.send_checked(request).await?.bytes().await
    }
}

/// Encodes a batch payload for the `param` form field.
pub(crate) fn json_param<T: Serialize>(value: &T) -> Result<String, Error> {
    Ok(serde_json::to_string(value)?)
}

/// Final segment of a remote path.
pub(crate) fn remote_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
