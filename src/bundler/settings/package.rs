//! Package metadata and configuration.

/// Default principal class written to the bundle descriptor and launch script.
pub const DEFAULT_MAIN_CLASS: &str = "Application";

/// Package metadata and configuration.
///
/// Describes the application the bundle is built for. The bundle root, launch
/// script and descriptor are all named after [`PackageSettings::name`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_woa::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     name: "App".into(),
///     version: "1.0".into(),
///     main_class: Some("com.example.app.Application".into()),
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Application name.
    ///
    /// Names the bundle root (`<name>.bundle`) and the launch script.
    pub name: String,

    /// Version string.
    ///
    /// Example: "1.0", "2.3.1-SNAPSHOT"
    pub version: String,

    /// Fully qualified principal class.
    ///
    /// Default: None (uses [`DEFAULT_MAIN_CLASS`])
    pub main_class: Option<String>,
}

impl PackageSettings {
    /// Principal class, falling back to [`DEFAULT_MAIN_CLASS`].
    pub fn main_class(&self) -> &str {
        self.main_class.as_deref().unwrap_or(DEFAULT_MAIN_CLASS)
    }
}
