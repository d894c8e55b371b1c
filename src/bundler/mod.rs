//! Bundle assembly.
//!
//! Turns a compiled primary artifact, its resolved dependencies and the
//! project's resource trees into a self-contained `<name>.bundle` directory:
//!
//! ```text
//! App.bundle/
//! ├── App                                  launch script (applications)
//! └── Contents/
//!     ├── Info.plist                       bundle descriptor (applications)
//!     ├── MacOS/MacOSClassPath.txt         classpath manifests (applications)
//!     ├── UNIX/UNIXClassPath.txt
//!     ├── Frameworks/<artifact>.framework/ dependency web-tier resources
//!     ├── WebServerResources/
//!     └── Resources/
//!         └── Java/                        primary jar + dependencies
//! ```
//!
//! Assembly is deterministic: the same inputs produce the same tree, and
//! re-running over an existing bundle converges on the same contents.

pub mod artifact;
pub mod builder;
pub mod classpath;
pub mod error;
pub mod layout;
pub mod resources;
pub mod settings;
pub mod template;
pub mod utils;

pub use builder::{BundleState, Bundler, Stage};
pub use classpath::{Classpath, ClasspathBuilder};
pub use error::{Context, Error, ErrorExt, Result};
pub use layout::{BundleLayout, Subpath};
pub use settings::{
    BundleKind, BundleSettings, DEFAULT_MAIN_CLASS, DEFAULT_RESOURCES_FOLDER_NAME, PackageSettings,
    Platform, ResolvedArtifact, Settings, SettingsBuilder, SourceDirectorySpec,
};
pub use template::TemplateRenderer;

use std::path::PathBuf;

/// A bundle produced by [`Bundler`].
#[derive(Debug, Clone)]
pub struct AssembledBundle {
    /// Application or framework
    pub kind: BundleKind,

    /// Final state of the run
    pub state: BundleState,

    /// Bundle root directory
    pub root: PathBuf,

    /// Classpath written to the manifests, bundle-relative
    pub classpath: Classpath,

    /// Files written by the run (artifacts, descriptors, launch files), in
    /// write order. Merged and extracted resources are not listed.
    pub files: Vec<PathBuf>,

    /// SHA256 checksum of the bundle tree (hex encoded)
    pub checksum: String,

    /// Web-server split directory, when one was produced
    pub web_server_split: Option<PathBuf>,
}
