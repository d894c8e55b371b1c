//! Builder for constructing Settings.

use super::{BundleSettings, PackageSettings, ResolvedArtifact, Settings};
use crate::{bail, bundler::Error};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building assembly settings with validation.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_woa::bundler::{
///     BundleKind, BundleSettings, PackageSettings, ResolvedArtifact, SettingsBuilder,
/// };
///
/// # fn example() -> kodegen_bundler_woa::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_out_directory("target")
///     .package_settings(PackageSettings {
///         name: "MyFramework".into(),
///         version: "1.0".into(),
///         ..Default::default()
///     })
///     .primary_artifact(ResolvedArtifact::new("com.example", "myframework", "1.0", "target/myframework-1.0.jar"))
///     .bundle_settings(BundleSettings {
///         kind: BundleKind::Framework,
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    package_settings: Option<PackageSettings>,
    bundle_settings: BundleSettings,
    primary_artifact: Option<ResolvedArtifact>,
    dependencies: Vec<ResolvedArtifact>,
    project_base_directory: Option<PathBuf>,
    project_out_directory: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets package metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets bundle configuration.
    ///
    /// Default: [`BundleSettings::default`]
    pub fn bundle_settings(mut self, settings: BundleSettings) -> Self {
        self.bundle_settings = settings;
        self
    }

    /// Sets the project's own build artifact.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn primary_artifact(mut self, artifact: ResolvedArtifact) -> Self {
        self.primary_artifact = Some(artifact.primary());
        self
    }

    /// Sets the resolved dependencies, in resolution order.
    ///
    /// Default: Empty
    pub fn dependencies(mut self, dependencies: Vec<ResolvedArtifact>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Sets the project base directory.
    ///
    /// Default: current directory
    pub fn project_base_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_base_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory the bundle is created in.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_out_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_out_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `package_settings` (with a non-empty name)
    /// - `primary_artifact`
    /// - `project_out_directory`
    ///
    /// or if the dependency list repeats an identity or contains an artifact
    /// flagged as primary.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let package = self
            .package_settings
            .context("package_settings is required")?;
        if package.name.trim().is_empty() {
            bail!("package name must not be empty");
        }
        check_path_segment("package name", &package.name)?;
        if let Some(final_name) = &self.bundle_settings.final_bundle_name {
            check_path_segment("final bundle name", final_name)?;
        }
        check_path_segment(
            "resources folder name",
            &self.bundle_settings.resources_folder_name,
        )?;

        let primary = self
            .primary_artifact
            .context("primary_artifact is required")?;
        check_coordinates(&primary)?;
        let out_dir = self
            .project_out_directory
            .context("project_out_directory is required")?;

        let mut seen = HashSet::new();
        for dependency in &self.dependencies {
            if dependency.is_primary {
                bail!("dependency {} is flagged as the primary artifact", dependency);
            }
            check_coordinates(dependency)?;
            if !seen.insert(dependency.identity()) {
                bail!("dependency {} is listed more than once", dependency);
            }
        }

        Ok(Settings::new(
            package,
            self.bundle_settings,
            primary,
            self.dependencies,
            self.project_base_directory.unwrap_or_else(|| PathBuf::from(".")),
            out_dir,
        ))
    }
}

/// Coordinates become directory names under `Contents/Resources/Java` and
/// `Contents/Frameworks`; each must stay a single normal path segment.
fn check_coordinates(artifact: &ResolvedArtifact) -> crate::bundler::Result<()> {
    for segment in artifact.group_id.split('.') {
        check_path_segment("group id", segment)
            .map_err(|e| Error::GenericError(format!("artifact {artifact}: {e}")))?;
    }
    check_path_segment("artifact id", &artifact.artifact_id)
        .and_then(|()| check_path_segment("version", &artifact.version))
        .map_err(|e| Error::GenericError(format!("artifact {artifact}: {e}")))
}

fn check_path_segment(what: &str, value: &str) -> crate::bundler::Result<()> {
    if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\', '\0']) {
        bail!("{} {:?} is not a valid path segment", what, value);
    }
    Ok(())
}
