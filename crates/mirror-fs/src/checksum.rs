//! Content fingerprints used to classify sync writes

use sha2::{Digest, Sha256};

use crate::{NormalizedPath, Result, io};

/// `sha256:<hex>` fingerprint of `content`.
pub fn compute_checksum(content: &[u8]) -> String {
    format!("sha256:{:x}", Sha256::digest(content))
}

/// Fingerprint of the file at `path`.
pub fn compute_file_checksum(path: &NormalizedPath) -> Result<String> {
    io::read_bytes(path).map(|bytes| compute_checksum(&bytes))
}
