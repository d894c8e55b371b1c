//! Bundle directory layout.
//!
//! [`BundleLayout`] is a pure mapping from `(bundle root, Subpath)` to a path.
//! Computing a path never touches the filesystem; [`BundleLayout::ensure`] is
//! the explicit side-effecting step that creates the directory.

use super::{Result, utils::fs::ensure_directory};
use std::path::{Path, PathBuf};

/// Extension appended to the application name to form the bundle root.
pub const BUNDLE_EXTENSION: &str = "bundle";

/// Extension of per-dependency resource directories under `Contents/Frameworks`.
pub const FRAMEWORK_EXTENSION: &str = "framework";

/// Named directories inside a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subpath {
    /// `Contents`
    Contents,
    /// `Contents/MacOS`
    #[serde(rename = "macos")]
    MacOs,
    /// `Contents/UNIX`
    Unix,
    /// `Contents/Windows`
    Windows,
    /// `Contents/Resources`
    Resources,
    /// `Contents/WebServerResources`
    WebServerResources,
    /// `Contents/Resources/Java`
    Java,
    /// `Contents/Frameworks`
    Frameworks,
}

impl Subpath {
    /// Path segments of this subpath, relative to the bundle root.
    pub fn segments(self) -> &'static [&'static str] {
        match self {
            Subpath::Contents => &["Contents"],
            Subpath::MacOs => &["Contents", "MacOS"],
            Subpath::Unix => &["Contents", "UNIX"],
            Subpath::Windows => &["Contents", "Windows"],
            Subpath::Resources => &["Contents", "Resources"],
            Subpath::WebServerResources => &["Contents", "WebServerResources"],
            Subpath::Java => &["Contents", "Resources", "Java"],
            Subpath::Frameworks => &["Contents", "Frameworks"],
        }
    }

    /// Path relative to the bundle root.
    pub fn relative(self) -> PathBuf {
        self.segments().iter().collect()
    }
}

/// Location of a bundle on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    root: PathBuf,
    name: String,
}

impl BundleLayout {
    /// Layout for the bundle `<name>.bundle` inside `containing_directory`.
    pub fn new(containing_directory: &Path, name: &str) -> Self {
        Self {
            root: containing_directory.join(format!("{name}.{BUNDLE_EXTENSION}")),
            name: name.to_string(),
        }
    }

    /// Layout rooted at an explicit directory.
    ///
    /// Used for the web-server split, which mirrors the bundle's `Contents`
    /// tree under a differently named root.
    pub fn at_root(root: PathBuf, name: &str) -> Self {
        Self {
            root,
            name: name.to_string(),
        }
    }

    /// Bundle root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Application name the bundle was derived from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path of `subpath`. Does not touch the filesystem.
    pub fn path(&self, subpath: Subpath) -> PathBuf {
        self.root.join(subpath.relative())
    }

    /// Creates `subpath` if missing and returns its path.
    pub async fn ensure(&self, subpath: Subpath) -> Result<PathBuf> {
        ensure_directory(&self.root, subpath.segments()).await
    }

    /// Path of the launch script, `<root>/<name>`.
    pub fn launch_script_path(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// Path of `Contents/Info.plist`.
    pub fn info_plist_path(&self) -> PathBuf {
        self.path(Subpath::Contents).join("Info.plist")
    }

    /// Resource directory of one dependency, `Contents/Frameworks/<artifact_id>.framework`.
    pub fn framework_resources_path(&self, artifact_id: &str) -> PathBuf {
        self.path(Subpath::Frameworks)
            .join(format!("{artifact_id}.{FRAMEWORK_EXTENSION}"))
    }

    /// Strips the bundle root from `path`, for bundle-relative classpath entries.
    pub fn relativize<'a>(&self, path: &'a Path) -> Option<&'a Path> {
        path.strip_prefix(&self.root).ok()
    }
}
