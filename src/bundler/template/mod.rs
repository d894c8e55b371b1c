//! Template rendering for bundle descriptors and launch files.
//!
//! Uses handlebars in strict mode: a placeholder without a value is a render
//! error, never an empty substitution.
//!
//! Templates may use `{{{shell_quote value}}}` to emit a value as a single
//! POSIX shell word.

mod builtin;

use crate::bundler::{
    Error, Result, Settings,
    classpath::Classpath,
    error::ErrorExt,
    layout::Subpath,
    utils::fs::write_file,
};
use handlebars::{Handlebars, handlebars_helper};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use builtin::{CLASSPATH_TEMPLATE, INFO_PLIST_TEMPLATE, LAUNCH_SCRIPT_TEMPLATE};

/// Name of the `Contents/Info.plist` template.
pub const INFO_PLIST: &str = "info-plist";
/// Name of the per-platform classpath manifest template.
pub const CLASSPATH: &str = "classpath";
/// Name of the launch script template.
pub const LAUNCH_SCRIPT: &str = "launch-script";

handlebars_helper!(shell_quote: |value: str| format!("'{}'", value.replace('\'', "'\\''")));

/// Values available to templates, keyed by placeholder name.
pub type TemplateVariables = BTreeMap<String, Value>;

/// Renders named templates against [`TemplateVariables`].
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.registry.get_templates().keys().collect();
        names.sort();
        f.debug_struct("TemplateRenderer")
            .field("templates", &names)
            .finish()
    }
}

impl TemplateRenderer {
    /// Creates a renderer with the built-in templates registered.
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_helper("shell_quote", Box::new(shell_quote));

        let mut renderer = Self { registry };
        renderer.register_template(INFO_PLIST, INFO_PLIST_TEMPLATE)?;
        renderer.register_template(CLASSPATH, CLASSPATH_TEMPLATE)?;
        renderer.register_template(LAUNCH_SCRIPT, LAUNCH_SCRIPT_TEMPLATE)?;
        Ok(renderer)
    }

    /// Registers (or replaces) a template from source.
    pub fn register_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| Error::Template {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Registers (or replaces) a template from a file.
    pub async fn register_template_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let source = tokio::fs::read_to_string(path)
            .await
            .fs_context("reading template", path)?;
        log::debug!("Using template override for `{}`: {}", name, path.display());
        self.register_template(name, &source)
    }

    /// Whether a template with this name is registered.
    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    /// Renders a template. Pure: no filesystem access.
    pub fn render(&self, name: &str, variables: &TemplateVariables) -> Result<String> {
        if !self.has_template(name) {
            return Err(Error::Template {
                name: name.to_string(),
                reason: "no such template".to_string(),
            });
        }
        self.registry
            .render(name, variables)
            .map_err(|e| Error::Template {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Renders a template to `destination`.
    ///
    /// The file mode is set after writing (`0o755` when `executable`,
    /// `0o644` otherwise) on unix.
    pub async fn render_to_file(
        &self,
        name: &str,
        variables: &TemplateVariables,
        destination: &Path,
        executable: bool,
    ) -> Result<PathBuf> {
        let contents = self.render(name, variables)?;
        write_file(destination, contents.as_bytes(), executable).await?;
        log::debug!("Rendered `{}` to {}", name, destination.display());
        Ok(destination.to_path_buf())
    }
}

/// Template variables for a bundle.
///
/// - `name`, `version`, `main_class`
/// - `classpath`: classpath entries in order
/// - `java_root`: `Contents/Resources/Java`
/// - `java_path`: archive entries relative to `java_root`
pub fn bundle_variables(settings: &Settings, classpath: &Classpath) -> TemplateVariables {
    let java_root = Subpath::Java.segments().join("/");
    let prefix = format!("{java_root}/");

    let java_path: Vec<Value> = classpath
        .entries()
        .iter()
        .filter_map(|entry| entry.strip_prefix(&prefix))
        .filter(|rel| !rel.is_empty())
        .map(|rel| Value::String(rel.to_string()))
        .collect();

    let mut variables = TemplateVariables::new();
    variables.insert("name".into(), Value::String(settings.name().to_string()));
    variables.insert(
        "version".into(),
        Value::String(settings.version_string().to_string()),
    );
    variables.insert(
        "main_class".into(),
        Value::String(settings.main_class().to_string()),
    );
    variables.insert(
        "classpath".into(),
        Value::Array(
            classpath
                .entries()
                .iter()
                .cloned()
                .map(Value::String)
                .collect(),
        ),
    );
    variables.insert("java_root".into(), Value::String(java_root));
    variables.insert("java_path".into(), Value::Array(java_path));
    variables
}
