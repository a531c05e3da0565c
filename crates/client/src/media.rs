//! Thumbnails, transcoded streaming and the per-category `stream` endpoint.

use pcs_protocol::constants::method;
use pcs_protocol::{Endpoint, StreamList, StreamType};
use pcs_transfer::validate_remote_path;

use crate::Error;
use crate::client::Client;
use crate::transport::BodyStream;

/// Parameters of [`Client::stream_list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamListOptions {
    pub kind: StreamType,
    pub start: u64,
    pub limit: u64,
    /// Directories to leave out, comma separated.
    pub filter_path: Option<String>,
}

impl Default for StreamListOptions {
    fn default() -> Self {
        Self {
            kind: StreamType::Image,
            start: 0,
            limit: 1000,
            filter_path: None,
        }
    }
}

impl Client {
    /// Thumbnail of an image, scaled to fit `width` x `height`.
    /// `quality` is a JPEG quality from 0 to 100.
    pub async fn thumbnail(
        &self,
        path: &str,
        width: u32,
        height: u32,
        quality: u8,
    ) -> Result<Vec<u8>, Error> {
        validate_remote_path(path)?;
        let req = self
            .get(Endpoint::Thumbnail, method::GENERATE)
            .query("path", path)
            .query("width", width)
            .query("height", height)
            .query("quality", quality.min(100));
        self.fetch(req).await
    }

    /// Transcoded playlist of a video, e.g. `M3U8_320_240`.
    ///
    /// See [`DEFAULT_STREAMING_TYPE`](pcs_protocol::constants::DEFAULT_STREAMING_TYPE).
    pub async fn streaming(&self, path: &str, transcode: &str) -> Result<Vec<u8>, Error> {
        validate_remote_path(path)?;
        let req = self
            .get(Endpoint::File, method::STREAMING)
            .query("path", path)
            .query("type", transcode);
        self.fetch(req).await
    }

    /// Lists files of one media category across the whole account.
    pub async fn stream_list(&self, options: &StreamListOptions) -> Result<StreamList, Error> {
        let req = self
            .get(Endpoint::Stream, method::LIST)
            .query("type", options.kind.as_str())
            .query("start", options.start)
            .query("limit", options.limit)
            .query_opt("filter_path", options.filter_path.as_deref());
        self.call("stream list", req).await
    }

    /// Streams a file through the `stream` endpoint.
    pub async fn stream_download(&self, path: &str) -> Result<BodyStream, Error> {
        validate_remote_path(path)?;
        let req = self
            .get(Endpoint::Stream, method::DOWNLOAD)
            .query("path", path);
        Ok(self.send_checked(req).await?.into_stream())
    }
}
