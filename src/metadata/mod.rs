//! Project descriptor loading.
//!
//! A project is described by a single TOML file:
//!
//! ```toml
//! [application]
//! name = "App"
//! version = "1.0"
//! group_id = "org.example"
//! artifact_id = "app"
//! artifact = "target/app-1.0.jar"
//!
//! [bundle]
//! kind = "application"
//! split_web_resources = true
//!
//! [[dependencies]]
//! group_id = "org.example"
//! artifact_id = "lib"
//! version = "2.3"
//! file = "repo/lib-2.3.jar"
//! ```
//!
//! Relative paths resolve against the descriptor's directory.

use crate::bundler::{
    BundleKind, BundleSettings, PackageSettings, Platform, ResolvedArtifact, Settings,
    SettingsBuilder, SourceDirectorySpec,
};
use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Output directory used when `[bundle] output_directory` is absent.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "target";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDescriptor {
    application: Option<RawApplication>,
    #[serde(default)]
    bundle: RawBundle,
    #[serde(default)]
    dependencies: Vec<ResolvedArtifact>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawApplication {
    name: String,
    version: String,
    group_id: String,
    artifact_id: String,
    artifact: PathBuf,
    main_class: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBundle {
    kind: Option<String>,
    resources_folder_name: Option<String>,
    final_name: Option<String>,
    #[serde(default)]
    split_web_resources: bool,
    platforms: Option<Vec<Platform>>,
    #[serde(default)]
    clean: bool,
    output_directory: Option<PathBuf>,
    #[serde(default)]
    templates: BTreeMap<String, PathBuf>,
    #[serde(default)]
    sources: Vec<SourceDirectorySpec>,
}

/// Load [`Settings`] from a project descriptor (single read + parse).
///
/// The descriptor's directory becomes the project base directory. Artifact
/// and output paths are resolved against it here; template and source paths
/// are kept as written and resolved by [`Settings`] when used.
pub fn load_manifest(descriptor_path: &Path) -> Result<Settings> {
    let contents =
        std::fs::read_to_string(descriptor_path).map_err(|source| ConfigError::Unreadable {
            path: descriptor_path.to_path_buf(),
            source,
        })?;

    let base = descriptor_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let settings = parse_manifest(&contents, &base)?;
    log::info!(
        "Loaded {} ({} dependencies) from {}",
        settings.name(),
        settings.dependencies().len(),
        descriptor_path.display()
    );
    Ok(settings)
}

/// Parse a descriptor already read into memory.
///
/// `base` is the project base directory used to resolve relative paths.
pub fn parse_manifest(contents: &str, base: &Path) -> Result<Settings> {
    let raw: RawDescriptor = toml::from_str(contents)?;

    let application = raw.application.ok_or_else(|| ConfigError::MissingField {
        field: "application".to_string(),
    })?;

    let bundle_settings = bundle_settings(raw.bundle.kind()?, &raw.bundle);

    let primary = ResolvedArtifact::new(
        application.group_id,
        application.artifact_id,
        application.version.clone(),
        base.join(&application.artifact),
    );

    let dependencies = raw
        .dependencies
        .into_iter()
        .map(|dependency| ResolvedArtifact {
            file: base.join(&dependency.file),
            ..dependency
        })
        .collect();

    let out_dir = base.join(
        raw.bundle
            .output_directory
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_OUTPUT_DIRECTORY)),
    );

    let settings = SettingsBuilder::new()
        .package_settings(PackageSettings {
            name: application.name,
            version: application.version,
            main_class: application.main_class,
        })
        .bundle_settings(bundle_settings)
        .primary_artifact(primary)
        .dependencies(dependencies)
        .project_base_directory(base)
        .project_out_directory(out_dir)
        .build()?;

    Ok(settings)
}

impl RawBundle {
    fn kind(&self) -> Result<BundleKind> {
        match &self.kind {
            Some(kind) => Ok(kind.parse::<BundleKind>()?),
            None => Ok(BundleKind::default()),
        }
    }
}

fn bundle_settings(kind: BundleKind, raw: &RawBundle) -> BundleSettings {
    let defaults = BundleSettings::default();

    BundleSettings {
        kind,
        resources_folder_name: raw
            .resources_folder_name
            .clone()
            .unwrap_or(defaults.resources_folder_name),
        final_bundle_name: raw.final_name.clone(),
        split_web_resources: raw.split_web_resources,
        platforms: raw.platforms.clone().unwrap_or(defaults.platforms),
        sources: raw.sources.clone(),
        templates: raw.templates.clone(),
        clean: raw.clean,
    }
}
