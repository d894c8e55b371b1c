//! Main bundle assembly orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that sequences artifact
//! copies, resource extraction, source tree merging and template rendering
//! into an application or framework bundle.

use super::{
    checksum::calculate_sha256,
    state::{BundleState, Stage},
};
use crate::bundler::{
    AssembledBundle, BundleKind, Error, Result, Settings,
    artifact::{copy_dependency, copy_primary_artifact},
    classpath::{Classpath, ClasspathBuilder},
    layout::{BundleLayout, Subpath},
    resources::{extract_if_present, merge_into, merge_source_directories},
    template::{self, TemplateRenderer, TemplateVariables, bundle_variables},
    utils::fs,
};
use std::{
    future::Future,
    path::{Path, PathBuf},
};

/// Main bundle orchestrator.
///
/// Runs the assembly pipeline for one [`Settings`] value. Every stage
/// finishes before the next starts; the first failure aborts the run and is
/// reported with the stage that produced it.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_woa::bundler::{Bundler, Settings};
///
/// # async fn example(settings: Settings) -> kodegen_bundler_woa::bundler::Result<()> {
/// let bundler = Bundler::new(settings).await?;
/// let bundle = bundler.bundle().await?;
///
/// println!("Assembled {} at {}", bundle.kind, bundle.root.display());
/// println!("SHA256: {}", bundle.checksum);
/// # Ok(())
/// # }
/// ```
pub struct Bundler {
    settings: Settings,
    templates: TemplateRenderer,
}

impl std::fmt::Debug for Bundler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundler")
            .field("settings", &self.settings)
            .field("templates", &self.templates)
            .finish()
    }
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    ///
    /// Template overrides from [`BundleSettings::templates`](crate::bundler::BundleSettings::templates)
    /// are loaded here, so a broken override fails before anything is written.
    pub async fn new(settings: Settings) -> Result<Self> {
        let mut templates = TemplateRenderer::new()?;
        for (name, path) in &settings.bundle_settings().templates {
            let path = settings.project_base_directory().join(path);
            templates.register_template_file(name, &path).await?;
        }

        Ok(Self {
            settings,
            templates,
        })
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the layout of the bundle this bundler assembles.
    pub fn layout(&self) -> BundleLayout {
        self.settings.layout()
    }

    /// Computes the classpath without touching the filesystem.
    ///
    /// Entries are bundle-relative: `Contents/Resources/Java/`, the primary
    /// jar, then each dependency in repository layout, in resolution order.
    pub fn classpath(&self) -> Classpath {
        let java = Subpath::Java.relative();
        let primary = java.join(self.settings.primary_jar_name());
        let dependencies: Vec<PathBuf> = self
            .settings
            .dependencies()
            .iter()
            .map(|dependency| java.join(dependency.repository_path()))
            .collect();

        ClasspathBuilder::build(&java, &primary, dependencies.iter().map(PathBuf::as_path))
    }

    /// Template variables for this bundle.
    pub fn template_variables(&self) -> TemplateVariables {
        bundle_variables(&self.settings, &self.classpath())
    }

    /// Assembles the bundle and, when configured, the web-server split.
    pub async fn bundle(&self) -> Result<AssembledBundle> {
        let mut bundle = self.assemble().await?;

        if self.settings.bundle_settings().split_web_resources {
            if bundle.kind == BundleKind::Application {
                bundle.web_server_split = Some(self.extract_web_server_resources(&bundle).await?);
            } else {
                log::warn!("Web resource split only applies to application bundles, skipping");
            }
        }

        Ok(bundle)
    }

    /// Runs the assembly pipeline.
    ///
    /// # Stages
    ///
    /// 1. Prepare the bundle root (erased first when `clean` is set)
    /// 2. Copy the primary artifact to `Contents/Resources/Java/<artifact>.jar`
    /// 3. Copy dependencies into repository layout
    /// 4. Extract dependency web-tier resources into `Contents/Frameworks`
    /// 5. Merge project source trees
    /// 6. Write `Contents/Info.plist` (applications)
    /// 7. Write classpath manifests and the launch script (applications)
    pub async fn assemble(&self) -> Result<AssembledBundle> {
        let settings = &self.settings;
        let kind = settings.kind();
        let layout = self.layout();
        let classpath = self.classpath();
        let variables = bundle_variables(settings, &classpath);
        let mut state = BundleState::Initialized;
        let mut files = Vec::new();

        log::info!(
            "Assembling {} bundle {} ({} dependencies)",
            kind,
            layout.root().display(),
            settings.dependencies().len()
        );

        run_stage(&mut state, kind, Stage::Prepare, async {
            fs::create_dir_all(layout.root(), settings.bundle_settings().clean).await
        })
        .await?;

        let primary = run_stage(&mut state, kind, Stage::CopyPrimaryArtifact, async {
            copy_primary_artifact(&layout, settings.primary_artifact(), &settings.primary_jar_name())
                .await
        })
        .await?;
        files.push(primary);

        let copied = run_stage(&mut state, kind, Stage::CopyDependencies, async {
            let mut copied = Vec::with_capacity(settings.dependencies().len());
            for dependency in settings.dependencies() {
                copied.push(copy_dependency(&layout, dependency).await?);
            }
            Ok::<_, Error>(copied)
        })
        .await?;
        files.extend(copied);

        run_stage(&mut state, kind, Stage::ExtractResources, async {
            let mut extracted = 0;
            for dependency in settings.dependencies() {
                let destination = layout.framework_resources_path(&dependency.artifact_id);
                if extract_if_present(&dependency.file, &destination).await? {
                    log::debug!("Extracted web server resources of {}", dependency);
                    extracted += 1;
                }
            }
            log::info!("Extracted web server resources from {} dependencies", extracted);
            Ok::<_, Error>(())
        })
        .await?;

        run_stage(&mut state, kind, Stage::MergeSourceTrees, async {
            merge_source_directories(&layout, &settings.source_directories()).await
        })
        .await?;

        let descriptors = run_stage(&mut state, kind, Stage::WriteDescriptors, async {
            match kind {
                BundleKind::Application => {
                    layout.ensure(Subpath::Contents).await?;
                    let plist = self
                        .templates
                        .render_to_file(template::INFO_PLIST, &variables, &layout.info_plist_path(), false)
                        .await?;
                    Ok::<_, Error>(vec![plist])
                }
                BundleKind::Framework => Ok(Vec::new()),
            }
        })
        .await?;
        files.extend(descriptors);

        let launch_files = run_stage(&mut state, kind, Stage::Finalize, async {
            match kind {
                BundleKind::Application => self.write_launch_files(&layout, &variables).await,
                BundleKind::Framework => Ok(Vec::new()),
            }
        })
        .await?;
        files.extend(launch_files);

        debug_assert!(state.is_finalized());

        let checksum = calculate_sha256(layout.root()).await?;
        log::info!("✓ Assembled {} bundle: {}", kind, layout.root().display());

        Ok(AssembledBundle {
            kind,
            state,
            root: layout.root().to_path_buf(),
            classpath,
            files,
            checksum,
            web_server_split: None,
        })
    }

    /// Writes per-platform classpath manifests and the executable launch script.
    async fn write_launch_files(
        &self,
        layout: &BundleLayout,
        variables: &TemplateVariables,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for platform in &self.settings.bundle_settings().platforms {
            let dir = layout.ensure(platform.subpath()).await?;
            let manifest = dir.join(platform.manifest_file_name());
            written.push(
                self.templates
                    .render_to_file(template::CLASSPATH, variables, &manifest, false)
                    .await?,
            );
        }

        written.push(
            self.templates
                .render_to_file(
                    template::LAUNCH_SCRIPT,
                    variables,
                    &layout.launch_script_path(),
                    true,
                )
                .await?,
        );

        Ok(written)
    }

    /// Extracts web-tier resources into the sibling split directory.
    ///
    /// Only valid for a finalized application bundle. Dependency resources go
    /// to `Contents/Frameworks/<artifact>.framework`, the primary artifact's
    /// to `Contents`, and the bundle's merged `Contents/WebServerResources`
    /// is copied over last.
    ///
    /// Returns the split directory.
    pub async fn extract_web_server_resources(&self, bundle: &AssembledBundle) -> Result<PathBuf> {
        let stage = Stage::ExtractWebServerResources;
        if bundle.state != stage.precondition() {
            return Err(Error::InvalidState(format!(
                "web server resources can only be split from a finalized application bundle, \
                 bundle at {} is {:?}",
                bundle.root.display(),
                bundle.state
            )));
        }

        let settings = &self.settings;
        let split_root = settings.web_server_split_directory();
        let split = BundleLayout::at_root(split_root.clone(), settings.name());
        let layout = self.layout();

        log::info!("Splitting web server resources into {}", split_root.display());

        let mut state = bundle.state;
        run_stage(&mut state, bundle.kind, stage, async {
            fs::ensure_directory(&split_root, std::iter::empty::<&Path>()).await?;

            for dependency in settings.dependencies() {
                let destination = split.framework_resources_path(&dependency.artifact_id);
                extract_if_present(&dependency.file, &destination).await?;
            }

            let primary = settings.primary_artifact();
            extract_if_present(&primary.file, &split.path(Subpath::Contents)).await?;

            merge_into(
                &layout.path(Subpath::WebServerResources),
                &split.path(Subpath::WebServerResources),
            )
            .await?;
            Ok::<_, Error>(())
        })
        .await?;

        log::info!("✓ Split web server resources: {}", split_root.display());
        Ok(split_root)
    }
}

/// Runs one stage: checks ordering, tags failures with the stage, advances state.
async fn run_stage<T, F>(state: &mut BundleState, kind: BundleKind, stage: Stage, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    debug_assert_eq!(*state, stage.precondition(), "stage {stage} out of order");
    log::debug!("Starting stage {}", stage);

    let output = work.await.map_err(|e| {
        log::error!("Stage {} failed: {}", stage, e);
        e.in_stage(stage)
    })?;

    *state = stage.outcome(kind);
    Ok(output)
}
