use crate::types::ByteRange;
use crate::{MAX_BLOCK_COUNT, TransferError};

/// Ordered, contiguous byte ranges covering `[0, size)` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    size: u64,
    chunk_size: u64,
    ranges: Vec<ByteRange>,
}

impl ChunkPlan {
    /// Plans `size` bytes in chunks of `chunk_size`, capped at
    /// [`MAX_BLOCK_COUNT`] chunks.
    ///
    /// - `size == 0` gives an empty plan.
    /// - `size <= chunk_size` gives a single range.
    /// - More chunks than the cap fails with
    ///   [`TransferError::ChunkCountExceeded`]; see [`adaptive_chunk_size`].
    pub fn new(size: u64, chunk_size: u64) -> Result<Self, TransferError> {
        Self::with_max_chunks(size, chunk_size, MAX_BLOCK_COUNT)
    }

    /// Like [`new`](Self::new) with an explicit chunk-count ceiling.
    pub fn with_max_chunks(
        size: u64,
        chunk_size: u64,
        max_chunks: u64,
    ) -> Result<Self, TransferError> {
        if chunk_size == 0 {
            return Err(TransferError::InvalidChunkSize);
        }
        if size.div_ceil(chunk_size) > max_chunks {
            return Err(TransferError::ChunkCountExceeded {
                size,
                chunk_size,
                max_chunks,
            });
        }
        Self::partition(size, chunk_size)
    }

    /// Plans with the smallest doubling of `base_chunk_size` that fits
    /// within `max_chunks`.
    pub fn adaptive(
        size: u64,
        base_chunk_size: u64,
        max_chunks: u64,
    ) -> Result<Self, TransferError> {
        let chunk_size = adaptive_chunk_size(size, base_chunk_size, max_chunks)?;
        Self::with_max_chunks(size, chunk_size, max_chunks)
    }

    /// Partitions `size` bytes with no ceiling on the number of chunks.
    pub fn partition(size: u64, chunk_size: u64) -> Result<Self, TransferError> {
        if chunk_size == 0 {
            return Err(TransferError::InvalidChunkSize);
        }

        let count = size.div_ceil(chunk_size);
        let mut ranges = Vec::with_capacity(count as usize);
        let mut offset = 0;
        while offset < size {
            let len = chunk_size.min(size - offset);
            ranges.push(ByteRange::new(offset, len));
            offset += len;
        }

        Ok(Self {
            size,
            chunk_size,
            ranges,
        })
    }

    /// Total bytes covered.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn ranges(&self) -> &[ByteRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// `true` when there is nothing to transfer.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ByteRange> {
        self.ranges.iter()
    }
}

impl<'a> IntoIterator for &'a ChunkPlan {
    type Item = &'a ByteRange;
    type IntoIter = std::slice::Iter<'a, ByteRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Doubles `base_chunk_size` until `size` fits in `max_chunks` chunks.
///
/// Fails when the base is zero, the ceiling is zero, or doubling would
/// overflow before the file fits.
pub fn adaptive_chunk_size(
    size: u64,
    base_chunk_size: u64,
    max_chunks: u64,
) -> Result<u64, TransferError> {
    if base_chunk_size == 0 {
        return Err(TransferError::InvalidChunkSize);
    }
    let exceeded = |chunk_size| TransferError::ChunkCountExceeded {
        size,
        chunk_size,
        max_chunks,
    };
    if max_chunks == 0 {
        return Err(exceeded(base_chunk_size));
    }

    let mut chunk_size = base_chunk_size;
    loop {
        match max_chunks.checked_mul(chunk_size) {
            Some(capacity) if size <= capacity => return Ok(chunk_size),
            // Capacity overflowed u64, so any u64 size fits.
            None => return Ok(chunk_size),
            Some(_) => {}
        }
        chunk_size = chunk_size
            .checked_mul(2)
            .ok_or_else(|| exceeded(chunk_size))?;
    }
}
