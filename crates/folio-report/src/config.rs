//! Report configuration types.

use serde::{Deserialize, Serialize};
use std::path::Path;

use folio_common::{Error, Result, StorageFormat};

/// Report color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTheme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
    /// Auto-detect from system preference.
    #[default]
    Auto,
}

impl ReportTheme {
    /// Get the CSS class for this theme.
    pub fn css_class(&self) -> &'static str {
        match self {
            ReportTheme::Light => "light",
            ReportTheme::Dark => "dark",
            ReportTheme::Auto => "",
        }
    }
}

/// Browser runtime loaded by pages that carry component scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeScript {
    /// Absolute URL of the script.
    pub url: String,
    /// Subresource integrity hash (`sha256-`, `sha384-` or `sha512-`).
    pub sri: String,
}

impl RuntimeScript {
    /// Create a runtime script reference.
    pub fn new(url: impl Into<String>, sri: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            sri: sri.into(),
        }
    }

    /// Check that the URL is http(s) and the hash names a known digest.
    pub fn validate(&self) -> Result<()> {
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(Error::Config(format!(
                "runtime url must be an http(s) URL, got {:?}",
                self.url
            )));
        }
        let known = ["sha256-", "sha384-", "sha512-"];
        let digest = known
            .iter()
            .find_map(|prefix| self.sri.strip_prefix(*prefix));
        if digest.map_or(true, str::is_empty) {
            return Err(Error::Config(format!(
                "runtime sri must be a sha256/sha384/sha512 integrity hash, got {:?}",
                self.sri
            )));
        }
        Ok(())
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Storage format token used when a constructor is not given one.
    #[serde(default = "default_storage_format")]
    pub default_storage_format: String,
    /// Color theme.
    #[serde(default)]
    pub theme: ReportTheme,
    /// Minify rendered pages.
    #[serde(default)]
    pub minify: bool,
    /// Generator name written into each page's meta tags.
    #[serde(default = "default_generator")]
    pub generator: String,
    /// Runtime script referenced by pages with component scripts.
    ///
    /// Without one, pages carry only their inline scripts.
    #[serde(default)]
    pub runtime: Option<RuntimeScript>,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_storage_format() -> String {
    StorageFormat::default().to_string()
}

fn default_generator() -> String {
    format!("folio {}", env!("CARGO_PKG_VERSION"))
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_storage_format: default_storage_format(),
            theme: ReportTheme::default(),
            minify: false,
            generator: default_generator(),
            runtime: None,
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default storage format token.
    pub fn with_storage_format(mut self, token: impl Into<String>) -> Self {
        self.default_storage_format = token.into();
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: ReportTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Enable minification of rendered pages.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Set the runtime script.
    pub fn with_runtime(mut self, runtime: RuntimeScript) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// The default storage format, parsed.
    pub fn storage_format(&self) -> Result<StorageFormat> {
        self.default_storage_format.parse()
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        self.storage_format()?;
        if self.generator.trim().is_empty() {
            return Err(Error::Config("generator must not be empty".to_string()));
        }
        if let Some(runtime) = &self.runtime {
            runtime.validate()?;
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ReportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
