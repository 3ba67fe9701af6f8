//! Error taxonomy for a generation run.
//!
//! Every emitter returns `Result<_, GenError>` and the driver stops at the first
//! failure. Each variant carries enough context to name the group, route or
//! artifact that triggered it.

use std::path::PathBuf;
use thiserror::Error;

/// Location of a route inside the graph, used for error attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRef {
    /// Group label (display name, folder annotation, or `#<index>`)
    pub group: String,
    /// Zero-based route position within the group
    pub route: usize,
    /// Handler token as written in the graph
    pub handler: String,
}

impl std::fmt::Display for RouteRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "group '{}', route #{} (handler '{}')",
            self.group, self.route, self.handler
        )
    }
}

/// Errors raised while deriving, rendering or persisting artifacts.
#[derive(Debug, Error)]
pub enum GenError {
    // =========================================================================
    // Configuration
    // =========================================================================
    #[error("invalid naming format '{format}': {reason}")]
    Configuration { format: String, reason: String },

    // =========================================================================
    // Derivation
    // =========================================================================
    #[error("cannot derive names for {location}: {reason}")]
    NamingResolution { location: RouteRef, reason: String },

    #[error("error code {code} assigned twice: {first} and {second}")]
    DuplicateCode {
        code: u32,
        first: String,
        second: String,
    },

    #[error(
        "authorization group '{subject}' has {routes} routes but an error-code block holds at most {capacity}"
    )]
    CodeBlockOverflow {
        subject: String,
        routes: usize,
        capacity: u32,
    },

    #[error("no error-code block #{group_index} for '{subject}': codes would exceed u32")]
    CodeRangeExhausted { subject: String, group_index: usize },

    #[error("identifier '{identifier}' derived twice: {first} and {second}")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("{} produced twice: {first} and {second}", path.display())]
    ArtifactCollision {
        path: PathBuf,
        first: String,
        second: String,
    },

    // =========================================================================
    // Templates
    // =========================================================================
    #[error("failed to render template '{template}' for {}: {source}", artifact.display())]
    Template {
        template: String,
        artifact: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error("template '{template}' does not compile: {source}")]
    TemplateSyntax {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to load template override {}: {source}", path.display())]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Persistence
    // =========================================================================
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
