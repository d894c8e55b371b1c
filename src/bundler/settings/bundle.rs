//! Bundle configuration: kind, platforms and source trees.

use crate::bundler::{Error, layout::Subpath};
use std::{collections::BTreeMap, fmt, path::PathBuf, str::FromStr};

/// Default name of the alternate resources folder under `src/main`.
pub const DEFAULT_RESOURCES_FOLDER_NAME: &str = "woresources";

/// What kind of bundle to assemble.
///
/// Applications get the full layout plus launch files. Frameworks are loaded
/// by a host application and stop after archive and resource handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BundleKind {
    /// Launchable application bundle.
    #[default]
    Application,
    /// Framework bundle, no launch files.
    Framework,
}

impl FromStr for BundleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "application" | "app" => Ok(Self::Application),
            "framework" => Ok(Self::Framework),
            _ => Err(Error::UnknownBundleKind(s.to_string())),
        }
    }
}

impl fmt::Display for BundleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleKind::Application => f.write_str("application"),
            BundleKind::Framework => f.write_str("framework"),
        }
    }
}

/// Target platform of a classpath manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// `Contents/MacOS/MacOSClassPath.txt`
    MacOs,
    /// `Contents/UNIX/UNIXClassPath.txt`
    Unix,
    /// `Contents/Windows/CLSSPATH.TXT`
    Windows,
}

impl Platform {
    /// Directory holding this platform's manifest.
    pub fn subpath(self) -> Subpath {
        match self {
            Platform::MacOs => Subpath::MacOs,
            Platform::Unix => Subpath::Unix,
            Platform::Windows => Subpath::Windows,
        }
    }

    /// Manifest file name the launcher looks for.
    pub fn manifest_file_name(self) -> &'static str {
        match self {
            Platform::MacOs => "MacOSClassPath.txt",
            Platform::Unix => "UNIXClassPath.txt",
            Platform::Windows => "CLSSPATH.TXT",
        }
    }

    /// Platforms written when none are configured.
    pub fn defaults() -> Vec<Platform> {
        vec![Platform::MacOs, Platform::Unix]
    }
}

/// A source tree merged into the bundle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct SourceDirectorySpec {
    /// Directory to copy from. Relative paths resolve against the project
    /// base directory.
    #[serde(rename = "path")]
    pub source_path: PathBuf,

    /// Bundle directory receiving the contents.
    pub destination: Subpath,

    /// Missing required sources fail the run; missing optional ones are skipped.
    #[serde(default)]
    pub required: bool,
}

impl SourceDirectorySpec {
    /// Optional source tree.
    pub fn optional(source_path: impl Into<PathBuf>, destination: Subpath) -> Self {
        Self {
            source_path: source_path.into(),
            destination,
            required: false,
        }
    }

    /// Required source tree.
    pub fn required(source_path: impl Into<PathBuf>, destination: Subpath) -> Self {
        Self {
            source_path: source_path.into(),
            destination,
            required: true,
        }
    }
}

/// Bundle configuration.
///
/// # Configuration
///
/// In a project descriptor:
///
/// ```toml
/// [bundle]
/// kind = "application"
/// resources_folder_name = "woresources"
/// split_web_resources = true
/// platforms = ["macos", "unix"]
/// ```
#[derive(Debug, Clone)]
pub struct BundleSettings {
    /// Application or framework.
    ///
    /// Default: [`BundleKind::Application`]
    pub kind: BundleKind,

    /// Folder under `src/main` merged into `Contents/Resources`.
    ///
    /// Default: `woresources`
    pub resources_folder_name: String,

    /// Name of the final bundle, used for the web-server split directory.
    ///
    /// Default: None (`<name>-<version>`)
    pub final_bundle_name: Option<String>,

    /// Extract web-tier resources into a sibling directory after assembly.
    ///
    /// Default: false
    pub split_web_resources: bool,

    /// Platforms that get a classpath manifest (applications only).
    ///
    /// Default: macOS and UNIX
    pub platforms: Vec<Platform>,

    /// Extra source trees, merged after the conventional ones in order.
    ///
    /// Default: Empty
    pub sources: Vec<SourceDirectorySpec>,

    /// Template overrides (template name -> template file).
    ///
    /// Default: Empty
    pub templates: BTreeMap<String, PathBuf>,

    /// Erase the bundle root before assembling.
    ///
    /// Without it, a previous bundle is merged into and files of removed
    /// dependencies stay behind.
    ///
    /// Default: false
    pub clean: bool,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            kind: BundleKind::default(),
            resources_folder_name: DEFAULT_RESOURCES_FOLDER_NAME.to_string(),
            final_bundle_name: None,
            split_web_resources: false,
            platforms: Platform::defaults(),
            sources: Vec::new(),
            templates: BTreeMap::new(),
            clean: false,
        }
    }
}
