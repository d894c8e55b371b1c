//! End-to-end assembly tests.

mod common;

use common::{Project, file_set, init_logging, is_executable, write_jar};
use kodegen_bundler_woa::bundler::{
    BundleKind, BundleSettings, BundleState, Bundler, Error, Platform, ResolvedArtifact,
    SourceDirectorySpec, Stage, Subpath,
};
use std::collections::BTreeMap;

const EXPECTED_MANIFEST: &str = "Contents/Resources/Java/\n\
                                 Contents/Resources/Java/app.jar\n\
                                 Contents/Resources/Java/org/example/lib/2.3/lib-2.3.jar\n";

#[tokio::test]
async fn test_application_end_to_end() {
    init_logging();
    let project = Project::new();
    let settings = project.settings(BundleKind::Application, vec![project.lib()]);

    let bundle = Bundler::new(settings).await.unwrap().bundle().await.unwrap();

    let root = project.bundle_root();
    assert_eq!(bundle.root, root);
    assert_eq!(bundle.state, BundleState::ApplicationFinalized);
    assert_eq!(bundle.checksum.len(), 64);
    assert!(bundle.web_server_split.is_none());

    let java = root.join("Contents/Resources/Java");
    assert!(java.join("app.jar").is_file());
    assert!(java.join("org/example/lib/2.3/lib-2.3.jar").is_file());

    let manifest =
        std::fs::read_to_string(root.join("Contents/MacOS/MacOSClassPath.txt")).unwrap();
    assert_eq!(manifest, EXPECTED_MANIFEST);
    assert_eq!(
        std::fs::read_to_string(root.join("Contents/UNIX/UNIXClassPath.txt")).unwrap(),
        EXPECTED_MANIFEST
    );
    assert!(!root.join("Contents/Windows").exists());

    let launcher = root.join("App");
    assert!(launcher.is_file());
    assert!(is_executable(&launcher));
    let script = std::fs::read_to_string(&launcher).unwrap();
    assert!(script.starts_with("#!/bin/sh"));
    assert!(script.contains("com.example.app.Application"));

    let plist = std::fs::read_to_string(root.join("Contents/Info.plist")).unwrap();
    assert!(plist.contains("<string>app.jar</string>"));
    assert!(plist.contains("<string>org/example/lib/2.3/lib-2.3.jar</string>"));
    assert!(plist.contains("<string>Contents/Resources/Java</string>"));

    assert_eq!(
        std::fs::read_to_string(
            root.join("Contents/Frameworks/lib.framework/WebServerResources/lib.js")
        )
        .unwrap(),
        "console.log('lib')"
    );
}

#[tokio::test]
async fn test_rerun_converges_on_same_bundle() {
    init_logging();
    let project = Project::new();
    project.source_file("components/Main.wo/Main.html", "<html/>");

    let first = Bundler::new(project.settings(BundleKind::Application, vec![project.lib()]))
        .await
        .unwrap()
        .bundle()
        .await
        .unwrap();
    let files_after_first = file_set(&first.root);
    let manifest_after_first =
        std::fs::read(first.root.join("Contents/MacOS/MacOSClassPath.txt")).unwrap();

    let second = Bundler::new(project.settings(BundleKind::Application, vec![project.lib()]))
        .await
        .unwrap()
        .bundle()
        .await
        .unwrap();

    assert_eq!(file_set(&second.root), files_after_first);
    assert_eq!(
        std::fs::read(second.root.join("Contents/MacOS/MacOSClassPath.txt")).unwrap(),
        manifest_after_first
    );
    assert_eq!(second.checksum, first.checksum);
    assert_eq!(second.files, first.files);
}

#[tokio::test]
async fn test_classpath_keeps_resolution_order() {
    init_logging();
    let project = Project::new();
    let repo = project.temp.path().join("repo");
    let zeta = repo.join("zeta-1.0.jar");
    let alpha = repo.join("alpha-9.jar");
    write_jar(&zeta, &[("z/Z.class", b"z")]);
    write_jar(&alpha, &[("a/A.class", b"a")]);

    let dependencies = vec![
        ResolvedArtifact::new("org.zeta", "zeta", "1.0", &zeta),
        project.lib(),
        ResolvedArtifact::new("com.alpha", "alpha", "9", &alpha),
    ];
    let bundler = Bundler::new(project.settings(BundleKind::Application, dependencies))
        .await
        .unwrap();

    let computed = bundler.classpath();
    let bundle = bundler.bundle().await.unwrap();

    assert_eq!(
        computed.entries(),
        [
            "Contents/Resources/Java/",
            "Contents/Resources/Java/app.jar",
            "Contents/Resources/Java/org/zeta/zeta/1.0/zeta-1.0.jar",
            "Contents/Resources/Java/org/example/lib/2.3/lib-2.3.jar",
            "Contents/Resources/Java/com/alpha/alpha/9/alpha-9.jar",
        ]
    );
    assert_eq!(bundle.classpath, computed);
    assert_eq!(
        std::fs::read_to_string(bundle.root.join("Contents/UNIX/UNIXClassPath.txt")).unwrap(),
        computed.to_manifest()
    );
}

#[tokio::test]
async fn test_framework_has_no_launch_files() {
    init_logging();
    let project = Project::new();
    let settings = project.settings(BundleKind::Framework, vec![project.lib()]);

    let bundle = Bundler::new(settings).await.unwrap().bundle().await.unwrap();

    let root = project.bundle_root();
    assert_eq!(bundle.state, BundleState::FrameworkFinalized);
    assert!(root.join("Contents/Resources/Java/app.jar").is_file());
    assert!(root.join("Contents/Frameworks/lib.framework").is_dir());
    assert!(!root.join("App").exists());
    assert!(!root.join("Contents/Info.plist").exists());
    assert!(!root.join("Contents/MacOS").exists());
    assert!(!root.join("Contents/UNIX").exists());
}

#[tokio::test]
async fn test_framework_rejects_web_split() {
    init_logging();
    let project = Project::new();
    let bundler = Bundler::new(project.settings(BundleKind::Framework, vec![]))
        .await
        .unwrap();
    let bundle = bundler.assemble().await.unwrap();

    let err = bundler
        .extract_web_server_resources(&bundle)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidState(_)));
}

#[tokio::test]
async fn test_unsafe_archive_entry_aborts_before_writing() {
    init_logging();
    let project = Project::new();
    let evil = project.temp.path().join("repo/evil-1.0.jar");
    write_jar(&evil, &[
        ("WebServerResources/ok.css", b"ok"),
        ("WebServerResources/../../escaped.txt", b"gotcha"),
    ]);
    let settings = project.settings(
        BundleKind::Application,
        vec![ResolvedArtifact::new("org.evil", "evil", "1.0", &evil)],
    );

    let err = Bundler::new(settings).await.unwrap().bundle().await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::ExtractResources));
    assert!(matches!(err.root(), Error::UnsafeArchiveEntry { .. }));
    assert!(err.to_string().contains("extract-resources"));

    let frameworks = project.bundle_root().join("Contents/Frameworks");
    assert!(!frameworks.join("escaped.txt").exists());
    assert!(!frameworks.join("evil.framework").exists());
    assert!(!project.bundle_root().join("App").exists());
}

#[tokio::test]
async fn test_missing_dependency_reports_stage() {
    init_logging();
    let project = Project::new();
    let missing = ResolvedArtifact::new(
        "org.example",
        "gone",
        "1.0",
        project.temp.path().join("repo/gone-1.0.jar"),
    );
    let settings = project.settings(BundleKind::Application, vec![missing]);

    let err = Bundler::new(settings).await.unwrap().bundle().await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::CopyDependencies));
    assert!(matches!(err.root(), Error::IoFailure { .. }));
}

#[tokio::test]
async fn test_file_in_place_of_directory_is_a_conflict() {
    init_logging();
    let project = Project::new();
    let contents = project.bundle_root().join("Contents");
    std::fs::create_dir_all(project.bundle_root()).unwrap();
    std::fs::write(&contents, "not a directory").unwrap();

    let err = Bundler::new(project.settings(BundleKind::Application, vec![]))
        .await
        .unwrap()
        .bundle()
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(Stage::CopyPrimaryArtifact));
    assert!(matches!(err.root(), Error::PathConflict { .. }));
}

#[tokio::test]
async fn test_file_in_place_of_bundle_root_is_a_conflict() {
    init_logging();
    for clean in [false, true] {
        let project = Project::new();
        std::fs::create_dir_all(project.out()).unwrap();
        std::fs::write(project.bundle_root(), "not a bundle").unwrap();

        let settings = project.settings_with(
            BundleSettings {
                clean,
                ..Default::default()
            },
            vec![],
        );
        let err = Bundler::new(settings)
            .await
            .unwrap()
            .bundle()
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Prepare), "clean = {clean}");
        assert!(
            matches!(err.root(), Error::PathConflict { path, .. } if *path == project.bundle_root()),
            "clean = {clean}: {err}"
        );
        assert!(project.bundle_root().is_file());
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_split_does_not_write_through_symlinked_directory() {
    init_logging();
    let project = Project::new();
    let outside = project.temp.path().join("outside");
    std::fs::create_dir_all(&outside).unwrap();
    project.source_file("webserver-resources/app.css", "merged{}");

    let settings = project.settings_with(
        BundleSettings {
            split_web_resources: true,
            ..Default::default()
        },
        vec![],
    );
    let split = settings.web_server_split_directory();
    let bundler = Bundler::new(settings).await.unwrap();
    bundler.bundle().await.unwrap();

    std::os::unix::fs::symlink(&outside, split.join("Contents/WebServerResources/shared")).unwrap();
    write_jar(&project.primary_jar(), &[
        ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n"),
        ("WebServerResources/shared/x.css", b"x{}"),
    ]);

    let err = bundler.bundle().await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::ExtractWebServerResources));
    assert!(matches!(err.root(), Error::PathConflict { .. }));
    assert!(!outside.join("x.css").exists());
}

#[tokio::test]
async fn test_conventional_source_trees_are_merged() {
    init_logging();
    let project = Project::new();
    project.source_file("components/Main.wo/Main.html", "<html/>");
    project.source_file("components/Properties", "components");
    project.source_file("woresources/Properties", "woresources");
    project.source_file("webserver-resources/img/logo.svg", "<svg/>");

    let bundle = Bundler::new(project.settings(BundleKind::Application, vec![]))
        .await
        .unwrap()
        .bundle()
        .await
        .unwrap();

    let resources = bundle.root.join("Contents/Resources");
    assert!(resources.join("Main.wo/Main.html").is_file());
    assert_eq!(
        std::fs::read_to_string(resources.join("Properties")).unwrap(),
        "woresources"
    );
    assert!(
        bundle
            .root
            .join("Contents/WebServerResources/img/logo.svg")
            .is_file()
    );
}

#[tokio::test]
async fn test_missing_optional_sources_are_skipped() {
    init_logging();
    let project = Project::new();

    let bundle = Bundler::new(project.settings(BundleKind::Application, vec![]))
        .await
        .unwrap()
        .bundle()
        .await
        .unwrap();

    let resources: Vec<_> = std::fs::read_dir(bundle.root.join("Contents/Resources"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(resources, ["Java"]);
    assert!(!bundle.root.join("Contents/WebServerResources").exists());
}

#[tokio::test]
async fn test_missing_required_source_fails_merge() {
    init_logging();
    let project = Project::new();
    let settings = project.settings_with(
        BundleSettings {
            sources: vec![SourceDirectorySpec::required("www", Subpath::WebServerResources)],
            ..Default::default()
        },
        vec![],
    );

    let err = Bundler::new(settings).await.unwrap().bundle().await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::MergeSourceTrees));
}

#[tokio::test]
async fn test_web_server_split() {
    init_logging();
    let project = Project::new();
    project.source_file("webserver-resources/img/logo.svg", "<svg/>");
    let settings = project.settings_with(
        BundleSettings {
            split_web_resources: true,
            ..Default::default()
        },
        vec![project.lib()],
    );

    let bundle = Bundler::new(settings).await.unwrap().bundle().await.unwrap();

    let split = project.out().join("App-1.0-webserver");
    assert_eq!(bundle.web_server_split.as_deref(), Some(split.as_path()));
    assert!(
        split
            .join("Contents/Frameworks/lib.framework/WebServerResources/lib.js")
            .is_file()
    );
    assert_eq!(
        std::fs::read_to_string(split.join("Contents/WebServerResources/app.css")).unwrap(),
        "main{}"
    );
    assert!(split.join("Contents/WebServerResources/img/logo.svg").is_file());
    assert!(!split.join("Contents/Resources").exists());
}

#[tokio::test]
async fn test_clean_erases_previous_bundle() {
    init_logging();
    let project = Project::new();
    let stale = project.bundle_root().join("Contents/Resources/Java/old/old-0.1.jar");
    std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
    std::fs::write(&stale, "stale").unwrap();

    Bundler::new(project.settings(BundleKind::Application, vec![]))
        .await
        .unwrap()
        .bundle()
        .await
        .unwrap();
    assert!(stale.exists(), "merge keeps files from earlier runs");

    let settings = project.settings_with(
        BundleSettings {
            clean: true,
            ..Default::default()
        },
        vec![],
    );
    Bundler::new(settings).await.unwrap().bundle().await.unwrap();
    assert!(!stale.exists());
}

#[tokio::test]
async fn test_platforms_and_template_overrides() {
    init_logging();
    let project = Project::new();
    let template = project.base().join("templates/classpath.hbs");
    std::fs::create_dir_all(template.parent().unwrap()).unwrap();
    std::fs::write(&template, "{{#each classpath}}{{{this}}};{{/each}}").unwrap();

    let settings = project.settings_with(
        BundleSettings {
            platforms: vec![Platform::Windows],
            templates: BTreeMap::from([(
                "classpath".to_string(),
                "templates/classpath.hbs".into(),
            )]),
            ..Default::default()
        },
        vec![],
    );

    let bundle = Bundler::new(settings).await.unwrap().bundle().await.unwrap();

    assert_eq!(
        std::fs::read_to_string(bundle.root.join("Contents/Windows/CLSSPATH.TXT")).unwrap(),
        "Contents/Resources/Java/;Contents/Resources/Java/app.jar;"
    );
    assert!(!bundle.root.join("Contents/MacOS").exists());
}

#[tokio::test]
async fn test_missing_template_override_fails_construction() {
    init_logging();
    let project = Project::new();
    let settings = project.settings_with(
        BundleSettings {
            templates: BTreeMap::from([("info-plist".to_string(), "nope.hbs".into())]),
            ..Default::default()
        },
        vec![],
    );

    assert!(Bundler::new(settings).await.is_err());
    assert!(!project.bundle_root().exists());
}
