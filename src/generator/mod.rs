//! # Generator Module
//!
//! Turns a [`RouteGraph`](crate::spec::RouteGraph) into Go service scaffolding:
//! HTTP handlers, per-subject authorization interfaces, a consolidated
//! authorization error catalog and an access-control policy table.
//!
//! ## Architecture
//!
//! ```text
//! RouteGraph → Naming Resolver → Emitters → Renderer → ArtifactSink
//! ```
//!
//! 1. **Naming** ([`naming`]) - pure derivations: handler/logic names, folders,
//!    authorization subjects
//! 2. **Codes** ([`codes`]) - error-code blocks for authorization-bearing groups
//! 3. **Emitters** - one per artifact kind, each returning rendered [`Artifact`]s
//! 4. **Driver** ([`generate`]) - renders everything, then persists in order
//!
//! ## Generated Structure
//!
//! ```text
//! <output>/
//! ├── etc/
//! │   └── auth_policy.csv          # p, <subject>_<action>, <subject>::<action>, true
//! └── internal/
//!     ├── auth/
//!     │   ├── error.go             # Err<Subject><Action>Denied catalog
//!     │   └── <subject>.go         # <Subject>Auth capability interface
//!     └── handler/
//!         ├── <handler>.go
//!         └── <folder>/<handler>.go
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use routegen::config::GeneratorConfig;
//! use routegen::generator::{generate, MemorySink, TemplateRegistry};
//! use routegen::spec::load_graph;
//!
//! # fn main() -> anyhow::Result<()> {
//! let graph = load_graph("api.yaml".as_ref())?;
//! let cfg = GeneratorConfig::new("example.com/shop");
//! let mut sink = MemorySink::new();
//! let report = generate(&graph, &cfg, &TemplateRegistry::builtin(), &mut sink)?;
//! println!("{} files", report.total());
//! # Ok(())
//! # }
//! ```
//!
//! ## Template Customization
//!
//! Built-in templates live in `templates/` and are embedded at compile time:
//!
//! - `handler.tpl` - Handler function
//! - `auth.tpl` - Capability interface and default implementation
//! - `auth_error.tpl` - Error catalog
//!
//! A file of the same name in the configured `template_dir` replaces the built-in.

pub mod casing;
pub mod codes;
pub mod naming;

mod auth;
mod auth_error;
mod format;
mod handlers;
mod policy;
mod project;
mod sink;
mod templates;

pub use auth::*;
pub use auth_error::*;
pub use format::{NamingFormat, DEFAULT_NAMING_FORMAT};
pub use handlers::*;
pub use policy::*;
pub use project::*;
pub use sink::*;
pub use templates::*;
