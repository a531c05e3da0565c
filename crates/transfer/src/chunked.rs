use std::io::SeekFrom;
use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

use crate::TransferError;
use crate::types::ByteRange;

/// Reads exact byte ranges out of a seekable source.
///
/// Each call seeks to the range start, so ranges may be read in any order,
/// though the upload pipeline always walks them ascending.
pub struct RangeReader<R> {
    inner: R,
    size: u64,
}

impl RangeReader<tokio::fs::File> {
    /// Opens a local file and records its current size.
    pub async fn open(path: &Path) -> Result<Self, TransferError> {
        let file = tokio::fs::File::open(path).await?;
        let size = file.metadata().await?.len();
        Ok(Self { inner: file, size })
    }
}

impl<R> RangeReader<R>
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    /// Wraps a source whose length is already known.
    pub fn new(inner: R, size: u64) -> Self {
        Self { inner, size }
    }

    /// Total source size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Reads exactly `range.len` bytes starting at `range.offset`.
    ///
    /// A source that ends early yields [`TransferError::ShortRead`].
    pub async fn read_range(&mut self, range: ByteRange) -> Result<Vec<u8>, TransferError> {
        self.inner.seek(SeekFrom::Start(range.offset)).await?;

        let mut buf = Vec::with_capacity(range.len as usize);
        let read = (&mut self.inner)
            .take(range.len)
            .read_to_end(&mut buf)
            .await?;

        if read as u64 != range.len {
            return Err(TransferError::ShortRead {
                offset: range.offset,
                expected: range.len,
                actual: read as u64,
            });
        }
        Ok(buf)
    }

    /// Reads the whole source from the start.
    pub async fn read_all(&mut self) -> Result<Vec<u8>, TransferError> {
        self.read_range(ByteRange::new(0, self.size)).await
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
