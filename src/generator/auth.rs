//! Auth emitter: one capability interface per authorization-bearing group.

use super::casing::to_snake_case;
use super::naming::{
    action_name, auth_subject, base_name, group_label, join_packages, AuthSubject, AUTH_DIR,
};
use super::templates::{Artifact, ArtifactKind, Renderer, AUTH_TEMPLATE};
use crate::config::GeneratorConfig;
use crate::error::{GenError, RouteRef};
use crate::spec::Group;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Package providing the policy enforcer, relative to the module.
pub const ENFORCER_PACKAGE: &str = "common/bauth";
/// Package holding the entity types, relative to the module.
pub const ENTITY_PACKAGE: &str = "ent";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthMethod {
    /// `Can<Action>`
    pub name: String,
    /// Lower snake case of the action
    pub action: String,
    /// Policy scope checked by the method: `<policy_key>::<action>`
    pub scope: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthTemplateData {
    pub auth_name: String,
    pub subject: String,
    /// `<root>/internal/auth`
    pub auth_package: String,
    pub module_name: String,
    pub imports: Vec<String>,
    pub methods: Vec<AuthMethod>,
}

/// One capability per route, in route order.
///
/// # Errors
///
/// - [`GenError::NamingResolution`] for the first route without a usable handler token
/// - [`GenError::DuplicateIdentifier`] when two routes derive the same `Can<Action>`
pub fn auth_methods(
    group_index: usize,
    group: &Group,
    subject: &AuthSubject,
    cfg: &GeneratorConfig,
) -> Result<Vec<AuthMethod>, GenError> {
    let mut seen: BTreeMap<String, RouteRef> = BTreeMap::new();
    let mut methods = Vec::with_capacity(group.routes.len());
    for (route_index, route) in group.routes.iter().enumerate() {
        let location = || RouteRef {
            group: group_label(group_index, group, cfg),
            route: route_index,
            handler: route.handler.clone(),
        };
        let base = base_name(route, location)?;
        let name = format!("Can{}", action_name(&base));
        if let Some(first) = seen.get(&name) {
            return Err(GenError::DuplicateIdentifier {
                identifier: format!("{}Auth.{name}", subject.ident),
                first: first.to_string(),
                second: location().to_string(),
            });
        }
        seen.insert(name.clone(), location());
        let action = to_snake_case(&base);
        methods.push(AuthMethod {
            scope: format!("{}::{}", subject.policy_key, action),
            name,
            action,
        });
    }
    Ok(methods)
}

/// Render `internal/auth/<subject>.go`, or nothing when the group carries no
/// authorization subject.
///
/// # Errors
///
/// Propagates naming and template failures.
pub fn emit_auth(
    renderer: &Renderer<'_>,
    cfg: &GeneratorConfig,
    group_index: usize,
    group: &Group,
) -> Result<Option<Artifact>, GenError> {
    let Some(subject) = auth_subject(group, cfg) else {
        return Ok(None);
    };
    let methods = auth_methods(group_index, group, &subject, cfg)?;
    let module = cfg.module_name();
    let data = AuthTemplateData {
        auth_name: subject.ident.clone(),
        subject: subject.snake.clone(),
        auth_package: join_packages(&[&cfg.root_package, AUTH_DIR]),
        module_name: module.to_string(),
        imports: vec![
            join_packages(&[module, ENFORCER_PACKAGE]),
            join_packages(&[module, ENTITY_PACKAGE]),
        ],
        methods,
    };
    let path = PathBuf::from(AUTH_DIR).join(format!("{}.go", subject.snake));
    renderer
        .render(ArtifactKind::Auth, AUTH_TEMPLATE, path, data)
        .map(Some)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::generator::TemplateRegistry;
    use crate::spec::Route;

    fn products() -> Group {
        Group::new(vec![
            Route::new("createHandler"),
            Route::new("listAllHandler"),
        ])
        .with_annotation("group", "products")
    }

    #[test]
    fn test_methods_follow_route_order() {
        let cfg = GeneratorConfig::new("shop/api");
        let group = products();
        let subject = auth_subject(&group, &cfg).unwrap();
        let methods = auth_methods(0, &group, &subject, &cfg).unwrap();
        let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["CanCreate", "CanListAll"]);
        assert_eq!(methods[1].action, "list_all");
        assert_eq!(methods[1].scope, "products::list_all");
    }

    #[test]
    fn test_group_without_subject_emits_nothing() {
        let registry = TemplateRegistry::builtin();
        let renderer = Renderer::new(&registry).unwrap();
        let cfg = GeneratorConfig::new("shop/api");
        let group = Group::new(vec![Route::new("pingHandler")]);
        assert!(emit_auth(&renderer, &cfg, 0, &group).unwrap().is_none());
    }

    #[test]
    fn test_rendered_interface() {
        let registry = TemplateRegistry::builtin();
        let renderer = Renderer::new(&registry).unwrap();
        let cfg = GeneratorConfig::new("shop/api");
        let artifact = emit_auth(&renderer, &cfg, 0, &products()).unwrap().unwrap();

        assert_eq!(artifact.kind, ArtifactKind::Auth);
        assert_eq!(artifact.path, PathBuf::from("internal/auth/product.go"));
        let go = &artifact.contents;
        assert!(go.starts_with("// Code generated by routegen. DO NOT EDIT.\n\npackage auth\n"));
        assert!(go.contains("\t\"shop/common/bauth\"\n\t\"shop/ent\"\n"));
        assert!(go.contains("type ProductAuth interface {"));
        assert!(go.contains("\tCanCreate(ctx context.Context, r *ent.Product) bool\n"));
        assert!(go.contains("\tCanListAll(ctx context.Context, r *ent.Product) bool\n"));
        assert!(go.contains("a.enforcer.Enforce(ctx, \"products::list_all\", r)"));
        assert_eq!(go.matches("func (a *defaultProductAuth)").count(), 2);
    }

    #[test]
    fn test_repeated_action_is_rejected() {
        let cfg = GeneratorConfig::new("shop/api");
        let group = Group::new(vec![
            Route::new("listHandler"),
            Route::new("createHandler"),
            Route::new("ListHandler"),
        ])
        .with_annotation("group", "products");
        let subject = auth_subject(&group, &cfg).unwrap();
        match auth_methods(0, &group, &subject, &cfg).unwrap_err() {
            GenError::DuplicateIdentifier {
                identifier,
                first,
                second,
            } => {
                assert_eq!(identifier, "ProductAuth.CanList");
                assert!(first.contains("route #0"));
                assert!(second.contains("route #2"));
                assert!(second.contains("ListHandler"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_handler_token_fails() {
        let registry = TemplateRegistry::builtin();
        let renderer = Renderer::new(&registry).unwrap();
        let cfg = GeneratorConfig::new("shop/api");
        let group = Group::new(vec![Route::new("handler")]).with_annotation("group", "orders");
        assert!(matches!(
            emit_auth(&renderer, &cfg, 0, &group),
            Err(GenError::NamingResolution { .. })
        ));
    }
}
