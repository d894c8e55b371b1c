//! Core Settings struct and implementations.

use super::{BundleKind, BundleSettings, PackageSettings, ResolvedArtifact, SourceDirectorySpec};
use crate::bundler::layout::{BundleLayout, Subpath};
use std::path::{Path, PathBuf};

/// Main settings for bundle assembly.
///
/// The explicit input of one assembly run: everything the build tool would
/// otherwise inject (project metadata, resolved dependencies, directories).
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_woa::bundler::{PackageSettings, ResolvedArtifact, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_woa::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_base_directory(".")
///     .project_out_directory("target")
///     .package_settings(PackageSettings {
///         name: "App".into(),
///         version: "1.0".into(),
///         ..Default::default()
///     })
///     .primary_artifact(ResolvedArtifact::new("com.example", "app", "1.0", "target/app-1.0.jar"))
///     .dependencies(vec![
///         ResolvedArtifact::new("org.example", "lib", "2.3", "/repo/lib-2.3.jar"),
///     ])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package metadata.
    package: PackageSettings,

    /// Bundle configuration.
    bundle_settings: BundleSettings,

    /// The project's own build artifact.
    primary_artifact: ResolvedArtifact,

    /// Resolved dependencies in resolution order.
    dependencies: Vec<ResolvedArtifact>,

    /// Project root; conventional source trees live under `src/main`.
    project_base_directory: PathBuf,

    /// Directory receiving the bundle, typically `target`.
    project_out_directory: PathBuf,
}

impl Settings {
    /// Returns the application name.
    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the principal class.
    pub fn main_class(&self) -> &str {
        self.package.main_class()
    }

    /// Returns the primary artifact.
    pub fn primary_artifact(&self) -> &ResolvedArtifact {
        &self.primary_artifact
    }

    /// Returns the dependencies in resolution order.
    pub fn dependencies(&self) -> &[ResolvedArtifact] {
        &self.dependencies
    }

    /// Returns the project base directory.
    pub fn project_base_directory(&self) -> &Path {
        &self.project_base_directory
    }

    /// Returns the project output directory.
    pub fn project_out_directory(&self) -> &Path {
        &self.project_out_directory
    }

    /// Returns the bundle settings.
    pub fn bundle_settings(&self) -> &BundleSettings {
        &self.bundle_settings
    }

    /// Returns the bundle kind.
    pub fn kind(&self) -> BundleKind {
        self.bundle_settings.kind
    }

    /// Final bundle name, defaulting to `<name>-<version>`.
    pub fn final_bundle_name(&self) -> String {
        self.bundle_settings
            .final_bundle_name
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.name(), self.version_string()))
    }

    /// File name of the primary artifact inside the bundle: the lowercased
    /// artifact id with a `.jar` extension.
    pub fn primary_jar_name(&self) -> String {
        format!("{}.jar", self.primary_artifact.artifact_id.to_lowercase())
    }

    /// Layout of the bundle this run assembles.
    pub fn layout(&self) -> BundleLayout {
        BundleLayout::new(&self.project_out_directory, self.name())
    }

    /// Sibling directory receiving the web-server split.
    pub fn web_server_split_directory(&self) -> PathBuf {
        self.project_out_directory
            .join(format!("{}-webserver", self.final_bundle_name()))
    }

    /// Source trees to merge, in merge order, with paths resolved against the
    /// project base directory.
    ///
    /// Components first, then the resources folder, then web-server
    /// resources, then configured extras. Later trees overwrite earlier ones.
    pub fn source_directories(&self) -> Vec<SourceDirectorySpec> {
        let main = self.project_base_directory.join("src").join("main");

        let conventional = [
            SourceDirectorySpec::optional(main.join("components"), Subpath::Resources),
            SourceDirectorySpec::optional(
                main.join(&self.bundle_settings.resources_folder_name),
                Subpath::Resources,
            ),
            SourceDirectorySpec::optional(main.join("webserver-resources"), Subpath::WebServerResources),
        ];

        conventional
            .into_iter()
            .chain(self.bundle_settings.sources.iter().map(|spec| SourceDirectorySpec {
                source_path: self.project_base_directory.join(&spec.source_path),
                ..spec.clone()
            }))
            .collect()
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        bundle_settings: BundleSettings,
        primary_artifact: ResolvedArtifact,
        dependencies: Vec<ResolvedArtifact>,
        project_base_directory: PathBuf,
        project_out_directory: PathBuf,
    ) -> Self {
        Self {
            package,
            bundle_settings,
            primary_artifact,
            dependencies,
            project_base_directory,
            project_out_directory,
        }
    }
}
