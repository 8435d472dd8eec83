//! Hashing - SHA-256 for Exported Files
//!
//! Digests let two runs be compared byte for byte.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Hash a file as it sits on disk.
pub fn file_sha256(path: &Path) -> Result<String, std::io::Error> {
    Ok(sha256_hex(&fs::read(path)?))
}

// We need hex encoding
mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}
