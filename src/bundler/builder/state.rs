//! Assembly states and the stages that move between them.

use crate::bundler::BundleKind;
use std::fmt;

/// Where an assembly run currently stands.
///
/// Runs move strictly forward through these states and are never resumed
/// mid-way: a failed run is re-run from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleState {
    /// Bundle root prepared, nothing copied yet.
    Initialized,
    /// Primary artifact is in `Contents/Resources/Java`.
    PrimaryArtifactCopied,
    /// Every dependency is in repository layout.
    DependenciesCopied,
    /// Dependency web-tier resources are under `Contents/Frameworks`.
    ResourcesExtracted,
    /// Project source trees merged.
    SourceTreesMerged,
    /// Bundle descriptor written (applications only).
    DescriptorsWritten,
    /// Classpath manifests and launch script written.
    ApplicationFinalized,
    /// Framework bundle complete.
    FrameworkFinalized,
}

impl BundleState {
    /// Whether the run completed.
    pub fn is_finalized(self) -> bool {
        matches!(
            self,
            BundleState::ApplicationFinalized | BundleState::FrameworkFinalized
        )
    }
}

/// A unit of work in the assembly pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Create (or erase and recreate) the bundle root.
    Prepare,
    /// Copy the primary artifact.
    CopyPrimaryArtifact,
    /// Copy dependencies.
    CopyDependencies,
    /// Extract dependency web-tier resources.
    ExtractResources,
    /// Merge project source trees.
    MergeSourceTrees,
    /// Write the bundle descriptor.
    WriteDescriptors,
    /// Write classpath manifests and the launch script.
    Finalize,
    /// Extract web-tier resources into the sibling split directory.
    ExtractWebServerResources,
}

impl Stage {
    /// Stages of a run, in order.
    pub const PIPELINE: [Stage; 7] = [
        Stage::Prepare,
        Stage::CopyPrimaryArtifact,
        Stage::CopyDependencies,
        Stage::ExtractResources,
        Stage::MergeSourceTrees,
        Stage::WriteDescriptors,
        Stage::Finalize,
    ];

    /// State a run must be in for this stage to start.
    pub fn precondition(self) -> BundleState {
        match self {
            Stage::Prepare | Stage::CopyPrimaryArtifact => BundleState::Initialized,
            Stage::CopyDependencies => BundleState::PrimaryArtifactCopied,
            Stage::ExtractResources => BundleState::DependenciesCopied,
            Stage::MergeSourceTrees => BundleState::ResourcesExtracted,
            Stage::WriteDescriptors => BundleState::SourceTreesMerged,
            Stage::Finalize => BundleState::DescriptorsWritten,
            Stage::ExtractWebServerResources => BundleState::ApplicationFinalized,
        }
    }

    /// State a run is in once this stage succeeds.
    pub fn outcome(self, kind: BundleKind) -> BundleState {
        match self {
            Stage::Prepare => BundleState::Initialized,
            Stage::CopyPrimaryArtifact => BundleState::PrimaryArtifactCopied,
            Stage::CopyDependencies => BundleState::DependenciesCopied,
            Stage::ExtractResources => BundleState::ResourcesExtracted,
            Stage::MergeSourceTrees => BundleState::SourceTreesMerged,
            Stage::WriteDescriptors => BundleState::DescriptorsWritten,
            Stage::Finalize => match kind {
                BundleKind::Application => BundleState::ApplicationFinalized,
                BundleKind::Framework => BundleState::FrameworkFinalized,
            },
            Stage::ExtractWebServerResources => BundleState::ApplicationFinalized,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Prepare => "prepare",
            Stage::CopyPrimaryArtifact => "copy-primary-artifact",
            Stage::CopyDependencies => "copy-dependencies",
            Stage::ExtractResources => "extract-resources",
            Stage::MergeSourceTrees => "merge-source-trees",
            Stage::WriteDescriptors => "write-descriptors",
            Stage::Finalize => "finalize",
            Stage::ExtractWebServerResources => "extract-web-server-resources",
        };
        f.write_str(name)
    }
}
