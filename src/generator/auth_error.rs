//! Auth-error emitter: the consolidated denial catalog.
//!
//! One pass over the whole graph. Authorization-bearing groups open code blocks
//! in graph order; each route takes the next code of its group's block.

use super::casing::to_snake_case;
use super::codes::CodeAllocator;
use super::naming::{action_name, auth_subject, base_name, group_label, join_packages, AUTH_DIR};
use super::templates::{Artifact, ArtifactKind, Renderer, AUTH_ERROR_TEMPLATE};
use crate::config::GeneratorConfig;
use crate::error::{GenError, RouteRef};
use crate::spec::RouteGraph;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Catalog file name inside the auth folder.
pub const AUTH_ERROR_FILE: &str = "error.go";
/// Package providing coded errors, relative to the module.
pub const ERROR_PACKAGE: &str = "common/berr";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    /// `Err<Subject><Action>Denied`
    pub name: String,
    pub code: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorGroup {
    pub subject: String,
    pub policy_key: String,
    pub group_index: usize,
    pub entries: Vec<ErrorEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthErrorTemplateData {
    pub imports: Vec<String>,
    pub groups: Vec<ErrorGroup>,
}

/// Denial message shown to callers lacking a capability.
pub fn denial_message(subject_snake: &str, action_snake: &str) -> String {
    format!("You do not have permission to perform this action: {subject_snake}::{action_snake}")
}

/// Build the catalog entries for every authorization-bearing group.
///
/// # Errors
///
/// - [`GenError::CodeBlockOverflow`] if a group has more routes than a block holds
/// - [`GenError::DuplicateCode`] if a code would be issued twice
/// - [`GenError::DuplicateIdentifier`] if two routes derive the same entry name
/// - [`GenError::NamingResolution`] for an unusable handler token
pub fn error_groups(graph: &RouteGraph, cfg: &GeneratorConfig) -> Result<Vec<ErrorGroup>, GenError> {
    let mut allocator = CodeAllocator::new();
    let mut names: BTreeMap<String, RouteRef> = BTreeMap::new();
    let mut groups = Vec::new();

    for (position, group) in graph.groups.iter().enumerate() {
        let Some(subject) = auth_subject(group, cfg) else {
            continue;
        };
        let group_index = allocator.open_block(&subject.ident, group.routes.len())?;

        let mut entries = Vec::with_capacity(group.routes.len());
        for (route_index, route) in group.routes.iter().enumerate() {
            let location = || RouteRef {
                group: group_label(position, group, cfg),
                route: route_index,
                handler: route.handler.clone(),
            };
            let base = base_name(route, location)?;
            let name = format!("Err{}{}Denied", subject.ident, action_name(&base));
            if let Some(first) = names.get(&name) {
                return Err(GenError::DuplicateIdentifier {
                    identifier: name,
                    first: first.to_string(),
                    second: location().to_string(),
                });
            }
            names.insert(name.clone(), location());
            let code = allocator.issue(group_index, route_index, name.clone())?;
            entries.push(ErrorEntry {
                message: denial_message(&subject.snake, &to_snake_case(&base)),
                name,
                code,
            });
        }

        groups.push(ErrorGroup {
            subject: subject.ident,
            policy_key: subject.policy_key,
            group_index,
            entries,
        });
    }

    Ok(groups)
}

/// Render `internal/auth/error.go`.
///
/// The catalog is produced even when no group is authorization-bearing so that
/// a stale one is replaced.
///
/// # Errors
///
/// See [`error_groups`]; template failures propagate.
pub fn emit_auth_errors(
    renderer: &Renderer<'_>,
    cfg: &GeneratorConfig,
    graph: &RouteGraph,
) -> Result<Artifact, GenError> {
    let data = AuthErrorTemplateData {
        imports: vec![join_packages(&[cfg.module_name(), ERROR_PACKAGE])],
        groups: error_groups(graph, cfg)?,
    };
    let path = PathBuf::from(AUTH_DIR).join(AUTH_ERROR_FILE);
    renderer.render(ArtifactKind::AuthError, AUTH_ERROR_TEMPLATE, path, data)
}
