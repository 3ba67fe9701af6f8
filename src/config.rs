//! Generator configuration.
//!
//! Loaded from an optional `routegen.toml` that sits alongside the route graph,
//! then overridden by CLI flags.
//!
//! ```toml
//! naming_format = "go_zero"
//! root_package = "example.com/shop/api"
//! auth = true
//! template_dir = "templates"
//!
//! [annotations]
//! folder = "group"
//! auth = "group"
//! ```

use crate::error::GenError;
use crate::generator::{NamingFormat, DEFAULT_NAMING_FORMAT};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the route graph.
pub const CONFIG_FILE_NAME: &str = "routegen.toml";

/// Annotation keys the generator reads from groups and routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnnotationKeys {
    /// Key naming the handler sub-folder (route-level wins over group-level)
    pub folder: String,
    /// Key naming the authorization subject of a group
    pub auth: String,
}

impl Default for AnnotationKeys {
    fn default() -> Self {
        Self {
            folder: "group".to_string(),
            auth: "group".to_string(),
        }
    }
}

/// Options for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// File naming format, see [`NamingFormat`]
    pub naming_format: String,
    /// Module path prefixed to every cross-artifact import
    pub root_package: String,
    /// Emit authorization interfaces, the error catalog and the policy table
    pub auth: bool,
    pub annotations: AnnotationKeys,
    /// Directory whose files override built-in templates by name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            naming_format: DEFAULT_NAMING_FORMAT.to_string(),
            root_package: String::new(),
            auth: true,
            annotations: AnnotationKeys::default(),
            template_dir: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new(root_package: impl Into<String>) -> Self {
        Self {
            root_package: root_package.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration and return the parsed naming format.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Configuration`] for an invalid naming format. An empty
    /// format falls back to [`DEFAULT_NAMING_FORMAT`].
    pub fn naming(&self) -> Result<NamingFormat, GenError> {
        let format = self.naming_format.trim();
        if format.is_empty() {
            return Ok(NamingFormat::default());
        }
        NamingFormat::parse(format)
    }

    /// Check the configuration before anything is rendered.
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::naming`].
    pub fn validate(&self) -> Result<(), GenError> {
        self.naming().map(|_| ())
    }

    /// First path segment of the root package (the module name).
    pub fn module_name(&self) -> &str {
        self.root_package
            .trim_matches('/')
            .split('/')
            .next()
            .unwrap_or_default()
    }
}

/// Load a configuration file.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but cannot
/// be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Look for `routegen.toml` in the same directory as the route graph.
pub fn auto_detect_config_path(graph_path: &Path) -> Option<PathBuf> {
    let config_path = graph_path.parent()?.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Resolve the config path.
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the graph
/// 3. None (defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, graph_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    auto_detect_config_path(graph_path)
}
