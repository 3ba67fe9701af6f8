//! # routegen
//!
//! **routegen** turns an annotated route graph into Go service scaffolding: one
//! HTTP handler per route, plus, for groups that carry an authorization
//! annotation, a capability interface, entries in a shared denial error catalog
//! and rows in an access-control policy table.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Route graph model and YAML/JSON loading
//! - **[`config`]** - Generator configuration (`routegen.toml`)
//! - **[`generator`]** - Naming, error-code allocation, emitters and the driver
//! - **[`error`]** - Typed generation errors
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `routegen` command line
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(routegen)
//!     participant Spec as spec::load_graph
//!     participant Project as generator::generate
//!     participant Emitters as generator emitters
//!     participant Sink as ArtifactSink
//!
//!     CLI->>Spec: load_graph("api.yaml")
//!     Spec-->>CLI: RouteGraph
//!     CLI->>Project: generate(&graph, &cfg, &registry, &mut sink)
//!     Project->>Emitters: error catalog, policy table
//!     Project->>Emitters: per group: auth interface, handlers
//!     Emitters-->>Project: Vec<Artifact>
//!     Project->>Sink: persist each artifact in order
//!     Sink-->>CLI: GenerationReport
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use routegen::{generate_to_dir, GeneratorConfig, RouteGraph, Group, Route};
//!
//! let graph = RouteGraph::new(vec![
//!     Group::new(vec![Route::new("createHandler")]).with_annotation("group", "products"),
//! ]);
//! let report = generate_to_dir(&graph, &GeneratorConfig::new("example.com/shop"), "out".as_ref())?;
//! assert_eq!(report.auth_interfaces, 1);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod spec;

pub use config::GeneratorConfig;
pub use error::{GenError, RouteRef};
pub use generator::{generate, generate_to_dir, plan, GenerationReport};
pub use spec::{load_graph, Group, Route, RouteGraph};
