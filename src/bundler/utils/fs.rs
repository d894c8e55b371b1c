//! File system utilities for bundling.
//!
//! Provides idempotent directory creation, overwriting file copies,
//! merge-style directory copies and writes with explicit permissions.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Ensures `root/segments...` exists as a directory and returns it.
///
/// Missing intermediate directories are created. An existing directory is
/// returned unchanged; "already exists" from a concurrent creator counts as
/// success. A non-directory anywhere along the path is a
/// [`Error::PathConflict`].
pub async fn ensure_directory<I, S>(root: &Path, segments: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut path = root.to_path_buf();
    for segment in segments {
        path.push(segment);
    }

    match fs::metadata(&path).await {
        Ok(meta) if meta.is_dir() => return Ok(path),
        Ok(_) => {
            return Err(Error::PathConflict {
                path,
                reason: "expected a directory, found a file",
            });
        }
        // Missing, or a file further up; creation below reports which.
        Err(_) => {}
    }

    match fs::create_dir_all(&path).await {
        Ok(()) => Ok(path),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(path),
        Err(e) => match first_non_directory_ancestor(&path).await {
            Some(conflict) => Err(Error::PathConflict {
                path: conflict,
                reason: "expected a directory, found a file",
            }),
            None => Err(e).fs_context("creating directory", &path),
        },
    }
}

/// Finds the nearest existing ancestor that is not a directory.
async fn first_non_directory_ancestor(path: &Path) -> Option<PathBuf> {
    for ancestor in path.ancestors() {
        if let Ok(meta) = fs::metadata(ancestor).await {
            return (!meta.is_dir()).then(|| ancestor.to_path_buf());
        }
    }
    None
}

/// Creates all of the directories of the specified path, erasing it first if specified.
///
/// A file at `path` is a [`Error::PathConflict`] either way; it is never
/// erased.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        // Try removal, ignore NotFound (idempotent)
        match fs::remove_dir_all(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                if fs::symlink_metadata(path).await.is_ok_and(|meta| !meta.is_dir()) {
                    return Err(Error::PathConflict {
                        path: path.to_path_buf(),
                        reason: "expected a directory, found a file",
                    });
                }
                return Err(e).fs_context("erasing directory", path);
            }
        }
    }

    ensure_directory(path, std::iter::empty::<&Path>()).await?;
    Ok(())
}

/// Makes a symbolic link.
#[cfg(unix)]
fn symlink(src: &Path, dst: &Path, _is_dir: bool) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link.
#[cfg(windows)]
fn symlink(src: &Path, dst: &Path, is_dir: bool) -> io::Result<()> {
    if is_dir {
        std::os::windows::fs::symlink_dir(src, dst)
    } else {
        std::os::windows::fs::symlink_file(src, dst)
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// An existing destination file is overwritten. Fails if the source path is
/// a directory or doesn't exist, or if a directory occupies the destination.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let meta = fs::metadata(from)
        .await
        .fs_context("reading source file", from)?;
    if !meta.is_file() {
        return Err(Error::PathConflict {
            path: from.to_path_buf(),
            reason: "expected a file, found a directory",
        });
    }
    if to.is_dir() {
        return Err(Error::PathConflict {
            path: to.to_path_buf(),
            reason: "expected a file, found a directory",
        });
    }
    if let Some(dest_dir) = to.parent() {
        ensure_directory(dest_dir, std::iter::empty::<&Path>()).await?;
    }
    fs::copy(from, to).await.fs_context("copying file to", to)?;
    Ok(())
}

/// Writes `contents` to `path`, replacing any previous file, and sets the
/// file mode explicitly afterwards so it never depends on umask or the mode
/// of an overwritten file.
pub async fn write_file(path: &Path, contents: &[u8], executable: bool) -> Result<()> {
    if path.is_dir() {
        return Err(Error::PathConflict {
            path: path.to_path_buf(),
            reason: "expected a file, found a directory",
        });
    }
    if let Some(parent) = path.parent() {
        ensure_directory(parent, std::iter::empty::<&Path>()).await?;
    }
    fs::write(path, contents)
        .await
        .fs_context("writing file", path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = if executable { 0o755 } else { 0o644 };
        fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
            .await
            .fs_context("setting permissions on", path)?;
    }
    #[cfg(not(unix))]
    let _ = executable;

    Ok(())
}

/// Recursively copies the contents of `from` into `to`.
///
/// Merge semantics: directories are created as needed, existing files are
/// overwritten, files only present in `to` are left alone. Entries are
/// visited in file-name order. Symlinks are recreated as symlinks.
///
/// Returns the number of files (and symlinks) written.
pub async fn copy_dir_contents(from: &Path, to: &Path) -> Result<usize> {
    let meta = fs::metadata(from)
        .await
        .fs_context("reading source directory", from)?;
    if !meta.is_dir() {
        return Err(Error::PathConflict {
            path: from.to_path_buf(),
            reason: "expected a directory, found a file",
        });
    }

    ensure_directory(to, std::iter::empty::<&Path>()).await?;

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || copy_tree_blocking(&from, &to))
        .await
        .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

fn copy_tree_blocking(from: &Path, to: &Path) -> Result<usize> {
    let mut written = 0;

    for entry in walkdir::WalkDir::new(from)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        debug_assert!(entry.path().starts_with(from));
        let rel_path = entry.path().strip_prefix(from)?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_symlink() {
            let target = std::fs::read_link(entry.path())
                .fs_context("reading symlink", entry.path())?;
            remove_existing_file(&dest_path)?;
            symlink(&target, &dest_path, entry.path().is_dir())
                .fs_context("creating symlink", &dest_path)?;
            written += 1;
        } else if entry.file_type().is_dir() {
            match std::fs::symlink_metadata(&dest_path) {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => {
                    return Err(Error::PathConflict {
                        path: dest_path,
                        reason: "expected a directory, found a file",
                    });
                }
                Err(_) => std::fs::create_dir_all(&dest_path)
                    .fs_context("creating directory", &dest_path)?,
            }
        } else {
            if dest_path.is_dir() {
                return Err(Error::PathConflict {
                    path: dest_path,
                    reason: "expected a file, found a directory",
                });
            }
            remove_existing_file(&dest_path)?;
            std::fs::copy(entry.path(), &dest_path).fs_context("copying file to", &dest_path)?;
            log::debug!("merged {}", dest_path.display());
            written += 1;
        }
    }

    Ok(written)
}

/// Removes a file or symlink at `path` if present, so a symlink left by a
/// previous run is replaced rather than written through. A directory there
/// is a [`Error::PathConflict`].
fn remove_existing_file(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => Err(Error::PathConflict {
            path: path.to_path_buf(),
            reason: "expected a file, found a directory",
        }),
        Ok(_) => std::fs::remove_file(path).fs_context("removing existing file", path),
        Err(_) => Ok(()),
    }
}
