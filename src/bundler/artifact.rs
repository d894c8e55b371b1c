//! Copying archives into the bundle.
//!
//! Dependencies land in repository layout under `Contents/Resources/Java`
//! (`<group path>/<artifact>/<version>/<file>`); the primary artifact sits at
//! the top of that directory under its lowercased artifact id.

use super::{
    ResolvedArtifact, Result,
    error::Context,
    layout::{BundleLayout, Subpath},
    utils::fs::{copy_file, ensure_directory},
};
use std::path::{Path, PathBuf};

/// Copies `source` to `destination_dir/destination_file_name`.
///
/// The destination directory is created if needed and an existing file is
/// overwritten. Returns the destination path.
pub async fn copy_artifact(
    source: &Path,
    destination_dir: &Path,
    destination_file_name: &str,
) -> Result<PathBuf> {
    let dir = ensure_directory(destination_dir, std::iter::empty::<&Path>()).await?;
    let destination = dir.join(destination_file_name);
    copy_file(source, &destination).await?;
    log::debug!("Copied {} -> {}", source.display(), destination.display());
    Ok(destination)
}

/// Copies the primary artifact to `Contents/Resources/Java/<jar_name>`.
pub async fn copy_primary_artifact(
    layout: &BundleLayout,
    artifact: &ResolvedArtifact,
    jar_name: &str,
) -> Result<PathBuf> {
    let java_dir = layout.ensure(Subpath::Java).await?;
    copy_artifact(&artifact.file, &java_dir, jar_name).await
}

/// Copies a dependency into repository layout under `Contents/Resources/Java`.
pub async fn copy_dependency(layout: &BundleLayout, artifact: &ResolvedArtifact) -> Result<PathBuf> {
    let file_name = artifact
        .file_name()
        .with_context(|| format!("dependency {artifact} has no archive file name"))?;
    let destination_dir = layout.path(Subpath::Java).join(artifact.repository_dir());
    copy_artifact(&artifact.file, &destination_dir, file_name).await
}
