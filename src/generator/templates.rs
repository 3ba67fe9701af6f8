//! Template registry and renderer.
//!
//! Built-in templates are embedded at compile time. A registry is built once per
//! process (built-ins, optionally overridden from a directory) and passed to the
//! renderer explicitly; emitters never reach for global template state.

use crate::error::GenError;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Handler function template.
pub const HANDLER_TEMPLATE: &str = "handler.tpl";
/// Per-subject authorization interface template.
pub const AUTH_TEMPLATE: &str = "auth.tpl";
/// Consolidated authorization error catalog template.
pub const AUTH_ERROR_TEMPLATE: &str = "auth_error.tpl";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (HANDLER_TEMPLATE, include_str!("../../templates/handler.tpl")),
    (AUTH_TEMPLATE, include_str!("../../templates/auth.tpl")),
    (AUTH_ERROR_TEMPLATE, include_str!("../../templates/auth_error.tpl")),
];

/// What an artifact is, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Handler,
    Auth,
    AuthError,
    Policy,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ArtifactKind::Handler => "handler",
            ArtifactKind::Auth => "auth",
            ArtifactKind::AuthError => "auth error catalog",
            ArtifactKind::Policy => "policy table",
        };
        f.write_str(s)
    }
}

/// A rendered file, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub contents: String,
}

/// Read-only mapping from template name to template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRegistry {
    sources: BTreeMap<String, String>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateRegistry {
    /// Registry holding only the embedded templates.
    pub fn builtin() -> Self {
        let sources = BUILTIN_TEMPLATES
            .iter()
            .map(|(name, source)| (name.to_string(), source.to_string()))
            .collect();
        Self { sources }
    }

    /// Built-ins, with any same-named file in `dir` taking precedence.
    ///
    /// Files in `dir` that do not match a built-in name are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::TemplateLoad`] if an override exists but cannot be read.
    pub fn with_overrides(dir: &Path) -> Result<Self, GenError> {
        let mut registry = Self::builtin();
        for (name, _) in BUILTIN_TEMPLATES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            let source = std::fs::read_to_string(&path)
                .map_err(|source| GenError::TemplateLoad { path: path.clone(), source })?;
            tracing::debug!(template = name, path = %path.display(), "using template override");
            registry.insert(*name, source);
        }
        Ok(registry)
    }

    /// Built-ins, overridden from `dir` when one is given.
    ///
    /// # Errors
    ///
    /// See [`TemplateRegistry::with_overrides`].
    pub fn load(dir: Option<&Path>) -> Result<Self, GenError> {
        match dir {
            Some(dir) => Self::with_overrides(dir),
            None => Ok(Self::builtin()),
        }
    }

    /// Replace or add a template.
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(name.into(), source.into());
    }

    pub fn source(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }
}

/// Renders named templates into [`Artifact`]s.
///
/// All templates are compiled when the renderer is created, so a broken
/// override fails the run before anything is rendered.
pub struct Renderer<'a> {
    env: Environment<'a>,
}

impl<'a> Renderer<'a> {
    /// Compile every template in the registry.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::TemplateSyntax`] for the first template that does not parse.
    pub fn new(registry: &'a TemplateRegistry) -> Result<Self, GenError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        for (name, source) in &registry.sources {
            env.add_template(name.as_str(), source.as_str())
                .map_err(|source| GenError::TemplateSyntax {
                    template: name.clone(),
                    source,
                })?;
        }
        Ok(Self { env })
    }

    /// Render `template` with `data` into an artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Template`] if the template is unknown or rendering fails
    /// (including references to missing data fields).
    pub fn render<S: Serialize>(
        &self,
        kind: ArtifactKind,
        template: &str,
        path: PathBuf,
        data: S,
    ) -> Result<Artifact, GenError> {
        let contents = self
            .env
            .get_template(template)
            .and_then(|tpl| tpl.render(data))
            .map_err(|source| GenError::Template {
                template: template.to_string(),
                artifact: path.clone(),
                source,
            })?;
        Ok(Artifact {
            kind,
            path,
            contents,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_builtin_registry_has_all_templates() {
        let registry = TemplateRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec![AUTH_TEMPLATE, AUTH_ERROR_TEMPLATE, HANDLER_TEMPLATE]);
        assert!(Renderer::new(&registry).is_ok());
    }

    #[test]
    fn test_override_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(HANDLER_TEMPLATE), "// {{ handler_name }}\n").unwrap();
        fs::write(dir.path().join("unrelated.tpl"), "ignored").unwrap();

        let registry = TemplateRegistry::with_overrides(dir.path()).unwrap();
        assert_eq!(registry.source(HANDLER_TEMPLATE), Some("// {{ handler_name }}\n"));
        assert!(registry.source("unrelated.tpl").is_none());
        assert_eq!(
            registry.source(AUTH_TEMPLATE),
            TemplateRegistry::builtin().source(AUTH_TEMPLATE)
        );

        let renderer = Renderer::new(&registry).unwrap();
        let artifact = renderer
            .render(
                ArtifactKind::Handler,
                HANDLER_TEMPLATE,
                PathBuf::from("x.go"),
                json!({ "handler_name": "ListHandler" }),
            )
            .unwrap();
        assert_eq!(artifact.contents, "// ListHandler\n");
    }

    #[test]
    fn test_syntax_error_names_template() {
        let mut registry = TemplateRegistry::builtin();
        registry.insert(AUTH_TEMPLATE, "{% if %}");
        match Renderer::new(&registry) {
            Err(GenError::TemplateSyntax { template, .. }) => assert_eq!(template, AUTH_TEMPLATE),
            _ => panic!("expected a syntax error"),
        }
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let mut registry = TemplateRegistry::builtin();
        registry.insert("probe.tpl", "{{ nope }}");
        let renderer = Renderer::new(&registry).unwrap();
        let err = renderer
            .render(ArtifactKind::Auth, "probe.tpl", PathBuf::from("p.go"), json!({}))
            .unwrap_err();
        assert!(matches!(err, GenError::Template { .. }));
        assert!(err.to_string().contains("p.go"));
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let registry = TemplateRegistry::builtin();
        let renderer = Renderer::new(&registry).unwrap();
        assert!(renderer
            .render(ArtifactKind::Auth, "nope.tpl", PathBuf::from("n.go"), json!({}))
            .is_err());
    }
}
