//! Policy emitter: the access-control table consumed by the policy enforcer.
//!
//! The row format is fixed, so this emitter builds text directly instead of
//! going through a template.

use super::casing::to_snake_case;
use super::naming::{auth_subject, base_name, group_label, ETC_DIR};
use super::templates::{Artifact, ArtifactKind};
use crate::config::GeneratorConfig;
use crate::error::{GenError, RouteRef};
use crate::spec::RouteGraph;
use std::path::PathBuf;

pub const POLICY_FILE: &str = "auth_policy.csv";

/// One `p, <name>, <scope>, true` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRow {
    pub name: String,
    pub scope: String,
}

impl PolicyRow {
    /// Row granting every action on a subject.
    pub fn management(policy_key: &str) -> Self {
        Self {
            name: format!("{policy_key}_management"),
            scope: format!("{policy_key}::*"),
        }
    }

    pub fn action(policy_key: &str, action: &str) -> Self {
        Self {
            name: format!("{policy_key}_{action}"),
            scope: format!("{policy_key}::{action}"),
        }
    }
}

impl std::fmt::Display for PolicyRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p, {}, {}, true", self.name, self.scope)
    }
}

/// All rows in graph order: per authorization-bearing group, the management
/// row followed by one row per route.
///
/// # Errors
///
/// Returns [`GenError::NamingResolution`] for an unusable handler token.
pub fn policy_rows(graph: &RouteGraph, cfg: &GeneratorConfig) -> Result<Vec<PolicyRow>, GenError> {
    let mut rows = Vec::new();
    for (group_index, group) in graph.groups.iter().enumerate() {
        let Some(subject) = auth_subject(group, cfg) else {
            continue;
        };
        rows.push(PolicyRow::management(&subject.policy_key));
        for (route_index, route) in group.routes.iter().enumerate() {
            let base = base_name(route, || RouteRef {
                group: group_label(group_index, group, cfg),
                route: route_index,
                handler: route.handler.clone(),
            })?;
            rows.push(PolicyRow::action(&subject.policy_key, &to_snake_case(&base)));
        }
    }
    Ok(rows)
}

/// Render `etc/auth_policy.csv`. Rows are newline-joined with no header and no
/// trailing newline.
///
/// # Errors
///
/// See [`policy_rows`].
pub fn emit_policy(graph: &RouteGraph, cfg: &GeneratorConfig) -> Result<Artifact, GenError> {
    let contents = policy_rows(graph, cfg)?
        .iter()
        .map(PolicyRow::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Artifact {
        kind: ArtifactKind::Policy,
        path: PathBuf::from(ETC_DIR).join(POLICY_FILE),
        contents,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::spec::{Group, Route};

    #[test]
    fn test_policy_table() {
        let cfg = GeneratorConfig::new("shop/api");
        let graph = RouteGraph::new(vec![
            Group::new(vec![Route::new("pingHandler")]),
            Group::new(vec![Route::new("createHandler"), Route::new("listAllHandler")])
                .with_annotation("group", "products"),
        ]);
        let artifact = emit_policy(&graph, &cfg).unwrap();
        assert_eq!(artifact.path, PathBuf::from("etc/auth_policy.csv"));
        assert_eq!(
            artifact.contents,
            "p, products_management, products::*, true\n\
             p, products_create, products::create, true\n\
             p, products_list_all, products::list_all, true"
        );
    }

    #[test]
    fn test_empty_graph_yields_empty_table() {
        let cfg = GeneratorConfig::new("shop/api");
        let artifact = emit_policy(&RouteGraph::default(), &cfg).unwrap();
        assert!(artifact.contents.is_empty());
    }

    #[test]
    fn test_multi_word_subject_key() {
        let cfg = GeneratorConfig::new("shop/api");
        let graph = RouteGraph::new(vec![
            Group::new(vec![Route::new("assignHandler")]).with_annotation("group", "UserRoles"),
        ]);
        let rows = policy_rows(&graph, &cfg).unwrap();
        assert_eq!(rows[0].to_string(), "p, user_roles_management, user_roles::*, true");
        assert_eq!(rows[1].scope, "user_roles::assign");
    }
}
