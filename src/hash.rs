//! Content hashing.
//!
//! Streams file bytes through SHA-256 (default) or BLAKE3 using a fixed
//! 1 MiB buffer, so memory stays bounded on arbitrarily large files.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::types::{ContentHash, HashAlgorithm};

/// Read buffer size for hashing.
pub const HASH_BUFFER_SIZE: usize = 1024 * 1024;

/// Compute the digest of a file's contents.
///
/// The file handle is dropped before returning, on success and on error.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> io::Result<ContentHash> {
    let file = File::open(path)?;
    hash_reader(file, algorithm)
}

/// Compute the digest of everything `reader` yields.
///
/// # Errors
/// Returns the first read error (interrupted reads are retried).
pub fn hash_reader<R: Read>(mut reader: R, algorithm: HashAlgorithm) -> io::Result<ContentHash> {
    let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

    match algorithm {
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            stream(&mut reader, &mut buffer, |chunk| hasher.update(chunk))?;
            Ok(ContentHash(hasher.finalize().into()))
        }
        HashAlgorithm::Blake3 => {
            let mut hasher = blake3::Hasher::new();
            stream(&mut reader, &mut buffer, |chunk| {
                hasher.update(chunk);
            })?;
            Ok(ContentHash(*hasher.finalize().as_bytes()))
        }
    }
}

fn stream<R: Read>(
    reader: &mut R,
    buffer: &mut [u8],
    mut update: impl FnMut(&[u8]),
) -> io::Result<()> {
    loop {
        let bytes_read = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        update(&buffer[..bytes_read]);
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
