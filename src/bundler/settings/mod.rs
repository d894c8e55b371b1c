//! Configuration structures for bundle assembly.
//!
//! This module provides the explicit input of an assembly run: package
//! metadata, the resolved artifacts, bundle options, and a builder that
//! validates them.

mod artifact;
mod builder;
mod bundle;
mod core;
mod package;

// Re-export all public types
pub use artifact::ResolvedArtifact;
pub use builder::SettingsBuilder;
pub use bundle::{
    BundleKind, BundleSettings, DEFAULT_RESOURCES_FOLDER_NAME, Platform, SourceDirectorySpec,
};
pub use core::Settings;
pub use package::{DEFAULT_MAIN_CLASS, PackageSettings};
