//! BLAKE3 hashing utilities for drift detection and manifest checksums

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;
use walkdir::WalkDir;

use crate::error::{AgentpackError, Result, file_read_failed};

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Length of the short checksum embedded in manifest rows
const SHORT_LEN: usize = 12;

/// Calculate BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| file_read_failed(path, &e))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| file_read_failed(path, &e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Calculate BLAKE3 hash of in-memory content
///
/// Used by smart sync to hash the source as it would be installed
/// (after placeholder substitution) without writing it anywhere.
pub fn hash_bytes(content: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(content);
    format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex())
}

/// Short checksum of a file for manifest rows (first 12 hex chars, no prefix)
pub fn short_checksum(path: &Path) -> Result<String> {
    let full = hash_file(path)?;
    let hex = full.trim_start_matches(HASH_PREFIX);
    Ok(hex.chars().take(SHORT_LEN).collect())
}

/// Calculate BLAKE3 hash of a directory's contents
///
/// Hashes all files recursively, sorted by path for deterministic results.
/// Relative paths are mixed into the hash so renames change it.
pub fn hash_directory(path: &Path) -> Result<String> {
    if !path.is_dir() {
        return Err(AgentpackError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut hasher = Hasher::new();
    let mut files: Vec<_> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .collect();

    // Sort for deterministic hashing
    files.sort_by_key(|e| e.path().to_path_buf());

    for entry in files {
        let file_path = entry.path();

        let relative_path = file_path
            .strip_prefix(path)
            .unwrap_or(file_path)
            .to_string_lossy()
            .replace('\\', "/");
        hasher.update(relative_path.as_bytes());
        hasher.update(b"\0");

        let file = File::open(file_path).map_err(|e| file_read_failed(file_path, &e))?;
        let mut reader = BufReader::new(file);
        let mut buffer = [0u8; 8192];

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .map_err(|e| file_read_failed(file_path, &e))?;

            if bytes_read == 0 {
                break;
            }

            hasher.update(&buffer[..bytes_read]);
        }

        hasher.update(b"\0");
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}
