use pcs_protocol::constants::MAX_PATH_LEN;

use crate::TransferError;

/// Characters the service refuses in path names.
const FORBIDDEN_CHARS: &[char] = &['\\', '?', '|', '"', '>', '<', ':', '*'];

/// Validates a remote path before it is sent to the service.
///
/// Rejects:
/// - Empty paths
/// - Relative paths (must start with `/`)
/// - Parent directory traversal (`..`)
/// - Characters the service forbids (`\ ? | " > < : *`)
/// - Paths longer than [`MAX_PATH_LEN`] bytes
pub fn validate_remote_path(path: &str) -> Result<(), TransferError> {
    if path.is_empty() {
        return Err(TransferError::InvalidPath("empty path".into()));
    }

    if !path.starts_with('/') {
        return Err(TransferError::InvalidPath(format!(
            "remote path must be absolute: {path}"
        )));
    }

    if path.len() > MAX_PATH_LEN {
        return Err(TransferError::InvalidPath(format!(
            "remote path exceeds {MAX_PATH_LEN} bytes"
        )));
    }

    if let Some(c) = path.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(TransferError::InvalidPath(format!(
            "character {c:?} not allowed: {path}"
        )));
    }

    if path.split('/').any(|segment| segment == "..") {
        return Err(TransferError::InvalidPath(format!(
            "parent directory traversal not allowed: {path}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_path() {
        assert!(validate_remote_path("").is_err());
    }

    #[test]
    fn rejects_relative_path() {
        assert!(validate_remote_path("apps/demo/a.txt").is_err());
    }

    #[test]
    fn rejects_parent_dir_traversal() {
        assert!(validate_remote_path("/apps/demo/../other/a.txt").is_err());
        assert!(validate_remote_path("/apps/demo/..").is_err());
    }

    #[test]
    fn rejects_forbidden_chars() {
        for p in ["/apps/demo/a?b", "/apps/demo/a:b", "/apps/demo/a*b", "/apps\\demo"] {
            assert!(validate_remote_path(p).is_err(), "{p} should be rejected");
        }
    }

    #[test]
    fn rejects_overlong_path() {
        let long = format!("/apps/{}", "x".repeat(MAX_PATH_LEN));
        assert!(validate_remote_path(&long).is_err());
    }

    #[test]
    fn accepts_valid_paths() {
        assert!(validate_remote_path("/apps/demo/a.txt").is_ok());
        assert!(validate_remote_path("/apps/demo/dir with space/..hidden").is_ok());
        assert!(validate_remote_path("/apps/demo/文件.jpg").is_ok());
    }

    #[test]
    fn error_variant_is_invalid_path() {
        assert!(matches!(
            validate_remote_path("relative"),
            Err(TransferError::InvalidPath(_))
        ));
    }
}
