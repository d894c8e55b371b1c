//! Resolved artifact records.

use std::path::{Path, PathBuf};

/// An artifact already located on disk with a known identity.
///
/// Produced by upstream dependency resolution; the bundler never resolves
/// anything itself. Identity is `(group_id, artifact_id, version)`.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_woa::bundler::ResolvedArtifact;
///
/// let lib = ResolvedArtifact::new("org.example", "lib", "2.3", "/repo/lib-2.3.jar");
/// assert_eq!(lib.repository_path(), std::path::Path::new("org/example/lib/2.3/lib-2.3.jar"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ResolvedArtifact {
    /// Group identifier, e.g. `org.example`.
    pub group_id: String,

    /// Artifact identifier, e.g. `lib`.
    pub artifact_id: String,

    /// Version string, e.g. `2.3`.
    pub version: String,

    /// Archive file on disk.
    pub file: PathBuf,

    /// Whether this is the project's own build artifact.
    #[serde(default)]
    pub is_primary: bool,
}

impl ResolvedArtifact {
    /// Creates a dependency artifact record.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            file: file.into(),
            is_primary: false,
        }
    }

    /// Marks the record as the primary build artifact.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// `(group_id, artifact_id, version)`.
    pub fn identity(&self) -> (&str, &str, &str) {
        (&self.group_id, &self.artifact_id, &self.version)
    }

    /// Archive file name, e.g. `lib-2.3.jar`.
    pub fn file_name(&self) -> Option<&str> {
        self.file.file_name().and_then(|n| n.to_str())
    }

    /// Directory in repository layout, `<group as path>/<artifact>/<version>`.
    ///
    /// Mirrors a standard repository layout so several versions of the same
    /// artifact coexist without collision.
    pub fn repository_dir(&self) -> PathBuf {
        let mut dir: PathBuf = self.group_id.split('.').collect();
        dir.push(&self.artifact_id);
        dir.push(&self.version);
        dir
    }

    /// Archive path in repository layout, `<repository_dir>/<file name>`.
    pub fn repository_path(&self) -> PathBuf {
        let file_name = self.file.file_name().map(Path::new).unwrap_or(Path::new(""));
        self.repository_dir().join(file_name)
    }
}

impl std::fmt::Display for ResolvedArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
