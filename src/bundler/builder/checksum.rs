//! Bundle checksum calculation.
//!
//! This module provides SHA256 checksum calculation for assembled bundles,
//! supporting both single files and directory trees.

use crate::{
    bail,
    bundler::{Error, Result, error::ErrorExt},
};
use sha2::{Digest, Sha256};
use std::{io::Read, path::Path};

/// Calculates SHA256 checksum of a file or directory.
///
/// For files: hashes the content.
/// For directories: hashes every file's bundle-relative path and content in
/// sorted path order, so the result does not depend on directory iteration
/// order. Two bundles with the same file set and contents hash equal.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If path cannot be read or is neither file nor directory
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading checksum target", path)?;

    if !metadata.is_file() && !metadata.is_dir() {
        bail!("Path is neither file nor directory: {}", path.display());
    }

    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let mut hasher = Sha256::new();
        if path.is_file() {
            hash_file(&mut hasher, &path)?;
        } else {
            hash_tree(&mut hasher, &path)?;
        }
        Ok(format!("{:x}", hasher.finalize()))
    })
    .await
    .map_err(|e| Error::GenericError(format!("Checksum task panicked: {}", e)))?
}

fn hash_file(hasher: &mut Sha256, path: &Path) -> Result<()> {
    let mut file = std::fs::File::open(path).fs_context("opening file for hashing", path)?;
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(())
}

fn hash_tree(hasher: &mut Sha256, root: &Path) -> Result<()> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            entries.push(entry.into_path());
        }
    }
    entries.sort();

    for path in entries {
        let rel_path = path.strip_prefix(root)?;
        let rel: Vec<_> = rel_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        hasher.update(rel.join("/").as_bytes());
        hasher.update([0u8]);
        hash_file(hasher, &path)?;
    }
    Ok(())
}
