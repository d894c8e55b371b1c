//! Classpath manifest construction.
//!
//! Entry order is a contract with the runtime launcher:
//!
//! 1. the directory containing the primary artifact (loose classes),
//! 2. the primary artifact,
//! 3. every dependency in resolution order.
//!
//! Dependencies are never sorted or deduplicated here.

use std::{
    fmt,
    path::{Component, Path},
};

/// Separator used by [`Classpath`]'s `Display` implementation.
pub const CLASSPATH_SEPARATOR: &str = ":";

/// Ordered classpath entries, `/`-separated regardless of host platform.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct Classpath {
    entries: Vec<String>,
}

impl Classpath {
    /// Entries in order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries joined with `separator`.
    pub fn joined(&self, separator: &str) -> String {
        self.entries.join(separator)
    }

    /// One entry per line, each terminated by `\n`.
    pub fn to_manifest(&self) -> String {
        let mut manifest = String::with_capacity(self.entries.iter().map(|e| e.len() + 1).sum());
        for entry in &self.entries {
            manifest.push_str(entry);
            manifest.push('\n');
        }
        manifest
    }
}

impl fmt::Display for Classpath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined(CLASSPATH_SEPARATOR))
    }
}

/// Builds [`Classpath`] values.
pub struct ClasspathBuilder;

impl ClasspathBuilder {
    /// Builds the classpath for a bundle.
    ///
    /// `primary_dir` is rendered with a trailing `/` so the launcher treats
    /// it as a directory entry.
    pub fn build<'a, I>(primary_dir: &Path, primary_path: &Path, dependency_paths: I) -> Classpath
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut entries = Vec::new();

        let mut dir = to_entry(primary_dir);
        if !dir.ends_with('/') {
            dir.push('/');
        }
        entries.push(dir);
        entries.push(to_entry(primary_path));
        entries.extend(dependency_paths.into_iter().map(to_entry));

        Classpath { entries }
    }
}

/// Renders a path with `/` separators, independent of the host platform.
fn to_entry(path: &Path) -> String {
    let mut entry = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => entry.push('/'),
            Component::Prefix(prefix) => entry.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::CurDir => {}
            Component::ParentDir | Component::Normal(_) => {
                if !entry.is_empty() && !entry.ends_with('/') {
                    entry.push('/');
                }
                entry.push_str(&component.as_os_str().to_string_lossy());
            }
        }
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn java(rel: &str) -> PathBuf {
        Path::new("Contents/Resources/Java").join(rel)
    }

    #[test]
    fn test_order_is_dir_primary_then_dependencies() {
        let deps = [java("org/example/lib/2.3/lib-2.3.jar"), java("com/acme/util/1.0/util-1.0.jar")];
        let classpath = ClasspathBuilder::build(
            Path::new("Contents/Resources/Java"),
            &java("app.jar"),
            deps.iter().map(PathBuf::as_path),
        );

        assert_eq!(
            classpath.entries(),
            [
                "Contents/Resources/Java/",
                "Contents/Resources/Java/app.jar",
                "Contents/Resources/Java/org/example/lib/2.3/lib-2.3.jar",
                "Contents/Resources/Java/com/acme/util/1.0/util-1.0.jar",
            ]
        );
    }

    #[test]
    fn test_dependencies_are_not_deduplicated_or_sorted() {
        let deps = [java("z.jar"), java("a.jar"), java("z.jar")];
        let classpath = ClasspathBuilder::build(
            Path::new("Contents/Resources/Java"),
            &java("app.jar"),
            deps.iter().map(PathBuf::as_path),
        );

        assert_eq!(&classpath.entries()[2..], [
            "Contents/Resources/Java/z.jar",
            "Contents/Resources/Java/a.jar",
            "Contents/Resources/Java/z.jar",
        ]);
    }

    #[test]
    fn test_output_is_byte_identical_across_builds() {
        let deps = [java("b.jar"), java("a.jar")];
        let build = || {
            ClasspathBuilder::build(
                Path::new("Contents/Resources/Java"),
                &java("app.jar"),
                deps.iter().map(PathBuf::as_path),
            )
        };

        assert_eq!(build().to_manifest(), build().to_manifest());
        assert_eq!(build().to_string(), build().to_string());
    }

    #[test]
    fn test_manifest_and_joined_forms() {
        let classpath = ClasspathBuilder::build(
            Path::new("Contents/Resources/Java/"),
            &java("app.jar"),
            std::iter::empty(),
        );

        assert_eq!(
            classpath.to_manifest(),
            "Contents/Resources/Java/\nContents/Resources/Java/app.jar\n"
        );
        assert_eq!(
            classpath.to_string(),
            "Contents/Resources/Java/:Contents/Resources/Java/app.jar"
        );
    }
}
