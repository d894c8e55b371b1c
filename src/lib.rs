//! WebObjects-style bundle assembly library
//!
//! This library assembles application and framework bundles from a compiled
//! primary artifact and its resolved dependencies:
//! - Copies archives into `Contents/Resources/Java` in repository layout
//! - Extracts dependency `WebServerResources/` into `Contents/Frameworks`
//! - Merges project resource trees
//! - Renders `Info.plist`, per-platform classpath manifests and a launch script
//!
//! Projects are described either programmatically through
//! [`bundler::SettingsBuilder`] or by a TOML descriptor read with
//! [`metadata::load_manifest`].

pub mod bundler;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, ConfigError, Result};
