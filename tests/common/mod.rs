//! Shared fixtures for integration tests.

#![allow(dead_code)]

use kodegen_bundler_woa::bundler::{
    BundleKind, BundleSettings, PackageSettings, ResolvedArtifact, Settings, SettingsBuilder,
};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Writes a jar with the given entries. Names ending in `/` become directories.
pub fn write_jar(path: &Path, entries: &[(&str, &[u8])]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
    }
    zip.finish().unwrap();
}

/// A scratch project: `project/` with sources, `repo/` with jars, output in `project/target`.
pub struct Project {
    pub temp: TempDir,
}

impl Project {
    /// Project with `app-1.0.jar` and `org.example:lib:2.3` at `repo/lib-2.3.jar`.
    pub fn new() -> Self {
        let project = Self {
            temp: TempDir::new().unwrap(),
        };
        write_jar(&project.primary_jar(), &[
            ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n"),
            ("com/example/app/Application.class", b"\xca\xfe\xba\xbe"),
            ("WebServerResources/app.css", b"main{}"),
        ]);
        write_jar(&project.lib_jar(), &[
            ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n"),
            ("org/example/lib/Lib.class", b"\xca\xfe\xba\xbe"),
            ("WebServerResources/", b""),
            ("WebServerResources/lib.js", b"console.log('lib')"),
        ]);
        project
    }

    pub fn base(&self) -> PathBuf {
        self.temp.path().join("project")
    }

    pub fn out(&self) -> PathBuf {
        self.base().join("target")
    }

    pub fn primary_jar(&self) -> PathBuf {
        self.base().join("target").join("build").join("app-1.0.jar")
    }

    pub fn lib_jar(&self) -> PathBuf {
        self.temp.path().join("repo").join("lib-2.3.jar")
    }

    pub fn bundle_root(&self) -> PathBuf {
        self.out().join("App.bundle")
    }

    pub fn lib(&self) -> ResolvedArtifact {
        ResolvedArtifact::new("org.example", "lib", "2.3", self.lib_jar())
    }

    /// Writes `contents` to `src/main/<relative>`.
    pub fn source_file(&self, relative: &str, contents: &str) {
        let path = self.base().join("src").join("main").join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    pub fn settings(&self, kind: BundleKind, dependencies: Vec<ResolvedArtifact>) -> Settings {
        self.settings_with(
            BundleSettings {
                kind,
                ..Default::default()
            },
            dependencies,
        )
    }

    pub fn settings_with(
        &self,
        bundle_settings: BundleSettings,
        dependencies: Vec<ResolvedArtifact>,
    ) -> Settings {
        SettingsBuilder::new()
            .package_settings(PackageSettings {
                name: "App".into(),
                version: "1.0".into(),
                main_class: Some("com.example.app.Application".into()),
            })
            .bundle_settings(bundle_settings)
            .primary_artifact(ResolvedArtifact::new(
                "com.example",
                "App",
                "1.0",
                self.primary_jar(),
            ))
            .dependencies(dependencies)
            .project_base_directory(self.base())
            .project_out_directory(self.out())
            .build()
            .unwrap()
    }
}

/// Every file under `root`, relative and `/`-joined, sorted.
pub fn file_set(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).unwrap().permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
