use std::io::Read;
use std::path::Path;

use md5::{Digest, Md5};

use crate::{RAPID_UPLOAD_SLICE_SIZE, TransferError};

/// Content fingerprint used by rapid upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestResult {
    /// MD5 of the whole content, lowercase hex.
    pub content_md5: String,
    /// MD5 of the first [`RAPID_UPLOAD_SLICE_SIZE`] bytes, lowercase hex.
    pub slice_md5: String,
    /// CRC-32 of the whole content as 8 lowercase hex digits.
    pub content_crc32: String,
    pub content_length: u64,
}

/// Computes the rapid-upload digest of a local file.
pub fn digest_file(path: &Path) -> Result<DigestResult, TransferError> {
    let file = std::fs::File::open(path)?;
    digest_reader(file)
}

/// Computes the rapid-upload digest in a single pass over `reader`.
///
/// The slice hash is the MD5 state after the first full read unit; for
/// content shorter than one unit it equals the whole-content hash.
pub fn digest_reader<R: Read>(mut reader: R) -> Result<DigestResult, TransferError> {
    let mut md5 = Md5::new();
    let mut crc = crc32fast::Hasher::new();
    let mut slice_md5 = None;
    let mut length = 0u64;
    let mut buf = vec![0u8; RAPID_UPLOAD_SLICE_SIZE];

    loop {
        let n = fill_unit(&mut reader, &mut buf)?;
        if n == 0 {
            break;
        }
        let unit = &buf[..n];
        md5.update(unit);
        crc.update(unit);
        length += n as u64;

        if slice_md5.is_none() {
            slice_md5 = Some(hex::encode(md5.clone().finalize()));
        }
        if n < buf.len() {
            break;
        }
    }

    let content_md5 = hex::encode(md5.finalize());
    Ok(DigestResult {
        slice_md5: slice_md5.unwrap_or_else(|| content_md5.clone()),
        content_md5,
        content_crc32: format!("{:08x}", crc.finalize()),
        content_length: length,
    })
}

/// Reads until `buf` is full or the source is exhausted.
fn fill_unit<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
