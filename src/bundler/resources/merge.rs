//! Merging project source trees into the bundle.
//!
//! Several source trees may target the same bundle directory; they are
//! merged in order, later files overwriting earlier ones, and nothing is ever
//! deleted from the destination.

use crate::bundler::{
    Error, Result, SourceDirectorySpec,
    error::ErrorExt,
    layout::BundleLayout,
    utils::fs::copy_dir_contents,
};
use std::{io, path::Path};

/// Copies the contents of `source` into `destination`.
///
/// A missing `source` is a no-op that leaves `destination` untouched.
/// Returns the number of files written.
pub async fn merge_into(source: &Path, destination: &Path) -> Result<usize> {
    match tokio::fs::metadata(source).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("Source tree {} does not exist, skipping", source.display());
            return Ok(0);
        }
        Err(e) => return Err(e).fs_context("reading source tree", source),
    }

    copy_dir_contents(source, destination).await
}

/// Merges every source tree into its bundle directory, in order.
///
/// Returns the total number of files written.
pub async fn merge_source_directories(
    layout: &BundleLayout,
    sources: &[SourceDirectorySpec],
) -> Result<usize> {
    let mut total = 0;

    for spec in sources {
        if !spec.source_path.exists() {
            if spec.required {
                return Err(Error::IoFailure {
                    context: "required source tree is missing",
                    path: spec.source_path.clone(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                });
            }
            log::debug!(
                "Optional source tree {} not present",
                spec.source_path.display()
            );
            continue;
        }

        let destination = layout.ensure(spec.destination).await?;
        let written = merge_into(&spec.source_path, &destination).await?;
        log::info!(
            "Merged {} files from {} into {}",
            written,
            spec.source_path.display(),
            destination.display()
        );
        total += written;
    }

    Ok(total)
}
