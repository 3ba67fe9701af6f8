//! Generation driver.
//!
//! Renders every artifact up front, then hands them to a sink in emission order.
//! With authorization enabled the order is: error catalog, policy table, then
//! per group its auth interface followed by its handlers.

use super::auth::emit_auth;
use super::auth_error::emit_auth_errors;
use super::handlers::emit_group_handlers;
use super::naming::group_label;
use super::policy::emit_policy;
use super::sink::{ArtifactSink, FileSystemSink};
use super::templates::{Artifact, ArtifactKind, Renderer, TemplateRegistry};
use crate::config::GeneratorConfig;
use crate::error::{GenError, RouteRef};
use crate::spec::RouteGraph;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub handlers: usize,
    pub auth_interfaces: usize,
    pub error_catalog: bool,
    pub policy_table: bool,
    /// Every persisted path, in emission order
    pub paths: Vec<PathBuf>,
}

impl GenerationReport {
    fn record(&mut self, artifact: &Artifact) {
        match artifact.kind {
            ArtifactKind::Handler => self.handlers += 1,
            ArtifactKind::Auth => self.auth_interfaces += 1,
            ArtifactKind::AuthError => self.error_catalog = true,
            ArtifactKind::Policy => self.policy_table = true,
        }
        self.paths.push(artifact.path.clone());
    }

    pub fn total(&self) -> usize {
        self.paths.len()
    }
}

/// Render every artifact for `graph` without persisting anything.
///
/// # Errors
///
/// Returns the first configuration, naming, code or template failure, or
/// [`GenError::ArtifactCollision`] when two artifacts resolve to one path.
/// Nothing is returned partially.
pub fn plan(
    graph: &RouteGraph,
    cfg: &GeneratorConfig,
    registry: &TemplateRegistry,
) -> Result<Vec<Artifact>, GenError> {
    let naming = cfg.naming()?;
    let renderer = Renderer::new(registry)?;
    let mut artifacts = Vec::with_capacity(graph.route_count() + graph.groups.len() + 2);
    // parallel to `artifacts`, for collision reports
    let mut owners: Vec<String> = Vec::with_capacity(artifacts.capacity());

    if cfg.auth {
        artifacts.push(emit_auth_errors(&renderer, cfg, graph)?);
        owners.push(ArtifactKind::AuthError.to_string());
        artifacts.push(emit_policy(graph, cfg)?);
        owners.push(ArtifactKind::Policy.to_string());
    }

    for (group_index, group) in graph.groups.iter().enumerate() {
        let label = group_label(group_index, group, cfg);
        if cfg.auth {
            if let Some(auth) = emit_auth(&renderer, cfg, group_index, group)? {
                artifacts.push(auth);
                owners.push(format!("auth interface of group '{label}'"));
            }
        }
        let handlers = emit_group_handlers(&renderer, cfg, &naming, group_index, group)?;
        owners.extend(group.routes.iter().enumerate().map(|(route, r)| {
            RouteRef {
                group: label.clone(),
                route,
                handler: r.handler.clone(),
            }
            .to_string()
        }));
        artifacts.extend(handlers);
    }

    check_path_collisions(&artifacts, &owners)?;
    Ok(artifacts)
}

/// Every artifact must own its path; a second writer would silently replace
/// the first.
fn check_path_collisions(artifacts: &[Artifact], owners: &[String]) -> Result<(), GenError> {
    let mut seen: BTreeMap<&Path, &str> = BTreeMap::new();
    for (artifact, owner) in artifacts.iter().zip(owners) {
        if let Some(first) = seen.get(artifact.path.as_path()) {
            return Err(GenError::ArtifactCollision {
                path: artifact.path.clone(),
                first: first.to_string(),
                second: owner.clone(),
            });
        }
        seen.insert(artifact.path.as_path(), owner.as_str());
    }
    Ok(())
}

/// Render and persist every artifact for `graph` through `sink`.
///
/// # Errors
///
/// Any failure from [`plan`] aborts before the first write. A write failure
/// stops the run; artifacts persisted before it are left in place.
pub fn generate(
    graph: &RouteGraph,
    cfg: &GeneratorConfig,
    registry: &TemplateRegistry,
    sink: &mut dyn ArtifactSink,
) -> Result<GenerationReport, GenError> {
    let artifacts = plan(graph, cfg, registry)?;
    let mut report = GenerationReport::default();
    for artifact in &artifacts {
        sink.persist(artifact)?;
        report.record(artifact);
    }
    tracing::info!(
        handlers = report.handlers,
        auth_interfaces = report.auth_interfaces,
        error_catalog = report.error_catalog,
        policy_table = report.policy_table,
        "generation complete"
    );
    Ok(report)
}

/// Generate into `output_dir`, loading template overrides from the configured
/// `template_dir`.
///
/// # Errors
///
/// See [`generate`]; also [`GenError::TemplateLoad`] for unreadable overrides.
pub fn generate_to_dir(
    graph: &RouteGraph,
    cfg: &GeneratorConfig,
    output_dir: &Path,
) -> Result<GenerationReport, GenError> {
    let registry = TemplateRegistry::load(cfg.template_dir.as_deref())?;
    let mut sink = FileSystemSink::new(output_dir);
    generate(graph, cfg, &registry, &mut sink)
}
