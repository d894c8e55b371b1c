//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that drives the
//! assembly pipeline from resolved artifacts to a finished bundle directory.
//!
//! # Overview
//!
//! The bundler:
//! 1. Reads configuration from [`Settings`](crate::bundler::Settings)
//! 2. Copies the primary artifact and dependencies into `Contents/Resources/Java`
//! 3. Extracts dependency web-tier resources and merges project source trees
//! 4. Renders the bundle descriptor, classpath manifests and launch script
//! 5. Returns an [`AssembledBundle`](crate::bundler::AssembledBundle) with a tree checksum
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_woa::bundler::{
//!     Bundler, PackageSettings, ResolvedArtifact, SettingsBuilder,
//! };
//!
//! # async fn example() -> kodegen_bundler_woa::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .project_out_directory("target")
//!     .package_settings(PackageSettings {
//!         name: "App".into(),
//!         version: "1.0".into(),
//!         main_class: None,
//!     })
//!     .primary_artifact(ResolvedArtifact::new("org.example", "app", "1.0", "target/app-1.0.jar"))
//!     .build()?;
//!
//! let bundler = Bundler::new(settings).await?;
//! let bundle = bundler.bundle().await?;
//!
//! println!("Created: {}", bundle.root.display());
//! println!("SHA256: {}", bundle.checksum);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for bundle trees
//! - [`orchestrator`] - Main [`Bundler`] struct and assembly stages
//! - [`state`] - Assembly states and stage ordering

mod checksum;
mod orchestrator;
mod state;

pub use checksum::calculate_sha256;
pub use orchestrator::Bundler;
pub use state::{BundleState, Stage};
