//! Web-tier resource extraction from jar archives.
//!
//! A jar carries web-tier resources when it has entries under the top-level
//! `WebServerResources/` directory. Those entries are extracted with their
//! archive-relative paths (marker directory included) into a destination
//! directory, overwriting files from earlier runs.
//!
//! Archives are not fully trusted: every entry name is validated before
//! anything is written, and one escaping entry aborts the whole extraction.

use crate::bundler::{Error, Result, error::ErrorExt};
use std::{
    fs::File,
    path::{Component, Path, PathBuf},
};
use zip::ZipArchive;

/// Directory prefix marking web-tier resources inside an archive.
pub const WEB_SERVER_RESOURCES_MARKER: &str = "WebServerResources/";

/// Result of inspecting an archive for web-tier resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceInspection {
    entries: Vec<String>,
}

impl ResourceInspection {
    /// Whether the archive carries the resource marker.
    pub fn has_resources(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Raw names of entries under the marker, in archive order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Lists the web-tier resource entries of `archive`.
pub async fn inspect(archive: &Path) -> Result<ResourceInspection> {
    let archive = archive.to_path_buf();
    tokio::task::spawn_blocking(move || inspect_blocking(&archive))
        .await
        .map_err(|e| Error::GenericError(format!("Archive inspection task panicked: {}", e)))?
}

/// Extracts the web-tier resources of `archive` into `destination`.
///
/// Returns `false` without touching `destination` when the archive has no
/// resource marker.
pub async fn extract_if_present(archive: &Path, destination: &Path) -> Result<bool> {
    let archive = archive.to_path_buf();
    let destination = destination.to_path_buf();
    tokio::task::spawn_blocking(move || extract_blocking(&archive, &destination))
        .await
        .map_err(|e| Error::GenericError(format!("Archive extraction task panicked: {}", e)))?
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path).fs_context("opening archive", path)?;
    ZipArchive::new(file).map_err(|source| Error::Archive {
        archive: path.to_path_buf(),
        source,
    })
}

fn inspect_blocking(path: &Path) -> Result<ResourceInspection> {
    let mut archive = open_archive(path)?;
    let mut entries = Vec::new();

    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index).map_err(|source| Error::Archive {
            archive: path.to_path_buf(),
            source,
        })?;
        if entry.name().starts_with(WEB_SERVER_RESOURCES_MARKER) {
            entries.push(entry.name().to_string());
        }
    }

    Ok(ResourceInspection { entries })
}

struct PlannedEntry {
    index: usize,
    relative: PathBuf,
    is_dir: bool,
}

fn extract_blocking(path: &Path, destination: &Path) -> Result<bool> {
    let mut archive = open_archive(path)?;

    // Validate everything first so a rejected archive writes nothing.
    let mut plan = Vec::new();
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index).map_err(|source| Error::Archive {
            archive: path.to_path_buf(),
            source,
        })?;
        let name = entry.name();
        if !name.starts_with(WEB_SERVER_RESOURCES_MARKER) {
            continue;
        }
        let relative = sanitize_entry_name(path, name)?;
        let is_dir = entry.is_dir();
        reject_symlinked_parents(destination, &relative, is_dir)?;
        plan.push(PlannedEntry {
            index,
            relative,
            is_dir,
        });
    }

    if plan.is_empty() {
        log::debug!("No web server resources in {}", path.display());
        return Ok(false);
    }

    std::fs::create_dir_all(destination).fs_context("creating extraction directory", destination)?;

    for planned in plan {
        let target = destination.join(&planned.relative);
        debug_assert!(target.starts_with(destination));

        if planned.is_dir {
            create_dir_checked(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            create_dir_checked(parent)?;
        }
        if target.is_dir() {
            return Err(Error::PathConflict {
                path: target,
                reason: "expected a file, found a directory",
            });
        }

        let mut entry = archive.by_index(planned.index).map_err(|source| Error::Archive {
            archive: path.to_path_buf(),
            source,
        })?;
        if std::fs::symlink_metadata(&target).is_ok_and(|meta| meta.file_type().is_symlink()) {
            std::fs::remove_file(&target).fs_context("removing stale symlink", &target)?;
        }
        let mut out = File::create(&target).fs_context("creating extracted file", &target)?;
        std::io::copy(&mut entry, &mut out).fs_context("writing extracted file", &target)?;
        log::debug!("Extracted {}", target.display());
    }

    Ok(true)
}

/// Fails if `destination`, or a directory between it and the entry, is a
/// symlink. Writing through one would land outside `destination`.
fn reject_symlinked_parents(destination: &Path, relative: &Path, is_dir: bool) -> Result<()> {
    let parents = if is_dir {
        Some(relative)
    } else {
        relative.parent()
    };

    let mut current = destination.to_path_buf();
    check_not_symlink(&current)?;
    for component in parents.into_iter().flat_map(Path::components) {
        current.push(component);
        check_not_symlink(&current)?;
    }
    Ok(())
}

fn check_not_symlink(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => Err(Error::PathConflict {
            path: path.to_path_buf(),
            reason: "expected a directory, found a symlink",
        }),
        _ => Ok(()),
    }
}

/// `create_dir_all` that reports a file in the way as a path conflict.
fn create_dir_checked(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|source| {
        match path
            .ancestors()
            .find(|a| a.exists())
            .filter(|a| !a.is_dir())
        {
            Some(conflict) => Error::PathConflict {
                path: conflict.to_path_buf(),
                reason: "expected a directory, found a file",
            },
            None => Error::IoFailure {
                context: "creating directory",
                path: path.to_path_buf(),
                source,
            },
        }
    })
}

/// Turns a raw entry name into a relative path that cannot leave the
/// extraction directory.
///
/// Rejects absolute names, `..` segments, backslashes, NUL bytes and any
/// segment the host platform would read as a drive or root.
fn sanitize_entry_name(archive: &Path, name: &str) -> Result<PathBuf> {
    let unsafe_entry = || Error::UnsafeArchiveEntry {
        archive: archive.to_path_buf(),
        entry: name.to_string(),
    };

    if name.starts_with('/') || name.contains('\\') || name.contains('\0') {
        return Err(unsafe_entry());
    }

    let mut relative = PathBuf::new();
    for segment in name.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(unsafe_entry()),
            segment => {
                let mut components = Path::new(segment).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(_)), None) => relative.push(segment),
                    _ => return Err(unsafe_entry()),
                }
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(unsafe_entry());
    }
    Ok(relative)
}
