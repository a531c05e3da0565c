use pcs_protocol::messages::SuperfileParam;

/// A half-open byte range `[offset, offset + len)` of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    pub offset: u64,
    pub len: u64,
}

impl ByteRange {
    pub fn new(offset: u64, len: u64) -> Self {
        Self { offset, len }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> u64 {
        self.offset + self.len
    }

    /// Inclusive last byte, as used by HTTP `Range` headers.
    ///
    /// Returns `None` for an empty range.
    pub fn last_byte(&self) -> Option<u64> {
        self.len.checked_sub(1).map(|n| self.offset + n)
    }
}

/// Ordered block checksums of a staged upload.
///
/// The server concatenates blocks in manifest order, so entries must be
/// pushed in chunk order. Consumed by value when the superfile is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockManifest {
    blocks: Vec<String>,
}

impl BlockManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(n),
        }
    }

    /// Appends the checksum of the next block.
    pub fn push(&mut self, md5: impl Into<String>) {
        self.blocks.push(md5.into());
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Encodes the manifest as the `param` form value of `createsuperfile`.
    pub fn to_param(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&SuperfileParam {
            block_list: self.blocks.clone(),
        })
    }

    pub fn into_blocks(self) -> Vec<String> {
        self.blocks
    }
}

impl From<Vec<String>> for BlockManifest {
    fn from(blocks: Vec<String>) -> Self {
        Self { blocks }
    }
}
