//! Naming resolver: handler/logic identifiers, folder placement and auth subjects.
//!
//! Everything here is a pure function of a route, its group and the annotation
//! keys in the configuration. Sibling routes never influence each other.

use super::casing::{title, to_camel_case, to_snake_case};
use crate::config::GeneratorConfig;
use crate::error::{GenError, RouteRef};
use crate::spec::{Group, Route};

/// Root folder for handler artifacts.
pub const HANDLER_DIR: &str = "internal/handler";
/// Root folder for business-logic packages referenced by handlers.
pub const LOGIC_DIR: &str = "internal/logic";
/// Service context package imported by every handler.
pub const CONTEXT_DIR: &str = "internal/svc";
/// Request/response types package.
pub const TYPES_DIR: &str = "internal/types";
/// Authorization interfaces and the error catalog.
pub const AUTH_DIR: &str = "internal/auth";
/// Policy table location.
pub const ETC_DIR: &str = "etc";
/// Logic package name used by handlers in the default folder.
pub const DEFAULT_LOGIC_PACKAGE: &str = "logic";

const HANDLER_SUFFIX: &str = "handler";

/// Label used to attribute errors to a group.
pub fn group_label(index: usize, group: &Group, cfg: &GeneratorConfig) -> String {
    group
        .name
        .clone()
        .or_else(|| group.annotation(&cfg.annotations.folder).map(str::to_string))
        .unwrap_or_else(|| format!("#{index}"))
}

/// Handler token with surrounding whitespace and one trailing `handler` suffix
/// (any casing) removed.
///
/// # Errors
///
/// Returns [`GenError::NamingResolution`] when nothing is left after stripping.
pub fn base_name(route: &Route, location: impl FnOnce() -> RouteRef) -> Result<String, GenError> {
    let token = route.handler.trim();
    let split = token.len().saturating_sub(HANDLER_SUFFIX.len());
    let base = match (token.get(..split), token.get(split..)) {
        (Some(head), Some(tail)) if tail.eq_ignore_ascii_case(HANDLER_SUFFIX) => head,
        _ => token,
    };
    if base.is_empty() {
        return Err(GenError::NamingResolution {
            location: location(),
            reason: if token.is_empty() {
                "handler token is empty".to_string()
            } else {
                format!("handler token '{token}' has nothing left after stripping the suffix")
            },
        });
    }
    Ok(base.to_string())
}

/// `<base>Handler`
pub fn handler_name(base: &str) -> String {
    format!("{base}Handler")
}

/// `<base>Logic`
pub fn logic_name(base: &str) -> String {
    format!("{base}Logic")
}

fn folder_annotation<'a>(group: &'a Group, route: &'a Route, cfg: &GeneratorConfig) -> Option<&'a str> {
    let key = &cfg.annotations.folder;
    route
        .annotation(key)
        .or_else(|| group.annotation(key))
        .map(|folder| folder.trim_matches('/'))
        .filter(|folder| !folder.is_empty())
}

/// Folder a route's handler is written to.
///
/// The route-level folder annotation wins over the group-level one. Without
/// either (or when the value is only slashes) the handler lands in [`HANDLER_DIR`].
pub fn folder_path(group: &Group, route: &Route, cfg: &GeneratorConfig) -> String {
    match folder_annotation(group, route, cfg) {
        Some(folder) => join_path(HANDLER_DIR, folder),
        None => HANDLER_DIR.to_string(),
    }
}

/// Logic package folder mirroring [`folder_path`] under [`LOGIC_DIR`].
pub fn logic_folder_path(group: &Group, route: &Route, cfg: &GeneratorConfig) -> String {
    match folder_annotation(group, route, cfg) {
        Some(folder) => join_path(LOGIC_DIR, folder),
        None => LOGIC_DIR.to_string(),
    }
}

/// Last segment of a folder path; the package name of files inside it.
pub fn leaf_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn join_path(root: &str, rest: &str) -> String {
    std::iter::once(root)
        .chain(rest.split('/'))
        .filter(|seg| !seg.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join import path segments with `/`, dropping empty ones.
pub fn join_packages(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|p| p.split('/'))
        .filter(|seg| !seg.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Access-controlled entity guarded by an authorization-bearing group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSubject {
    /// Annotation value as written (trimmed)
    pub raw: String,
    /// Singular camel case identifier: `products` → `Product`
    pub ident: String,
    /// Lower snake case of `ident`: artifact file stem and denial messages
    pub snake: String,
    /// Lower snake case of `raw`, used as the policy subject key
    pub policy_key: String,
}

/// Derive the authorization subject of a group, `None` when the group is not
/// authorization-bearing.
pub fn auth_subject(group: &Group, cfg: &GeneratorConfig) -> Option<AuthSubject> {
    let raw = group.annotation(&cfg.annotations.auth)?;
    let singular = raw.strip_suffix('s').unwrap_or(raw);
    let ident = to_camel_case(singular);
    if ident.is_empty() {
        return None;
    }
    Some(AuthSubject {
        raw: raw.to_string(),
        snake: to_snake_case(&ident),
        ident,
        policy_key: to_snake_case(raw),
    })
}

/// Capability action derived from a route's base name: `listAll` → `ListAll`.
pub fn action_name(base: &str) -> String {
    title(base)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn at() -> RouteRef {
        RouteRef {
            group: "#0".into(),
            route: 0,
            handler: String::new(),
        }
    }

    #[test]
    fn test_base_name_strips_one_suffix() {
        assert_eq!(base_name(&Route::new("listHandler"), at).unwrap(), "list");
        assert_eq!(base_name(&Route::new(" createhandler "), at).unwrap(), "create");
        assert_eq!(base_name(&Route::new("getHANDLER"), at).unwrap(), "get");
        assert_eq!(base_name(&Route::new("pingHandlerHandler"), at).unwrap(), "pingHandler");
        assert_eq!(base_name(&Route::new("ping"), at).unwrap(), "ping");
    }

    #[test]
    fn test_base_name_failures() {
        for token in ["", "   ", "Handler", "handler"] {
            let err = base_name(&Route::new(token), at).unwrap_err();
            assert!(matches!(err, GenError::NamingResolution { .. }), "{token:?}");
        }
    }

    #[test]
    fn test_base_name_multibyte_token() {
        assert_eq!(base_name(&Route::new("é"), at).unwrap(), "é");
    }

    #[test]
    fn test_derived_names() {
        assert_eq!(handler_name("list"), "listHandler");
        assert_eq!(logic_name("list"), "listLogic");
        assert_eq!(action_name("listAll"), "ListAll");
    }

    #[test]
    fn test_folder_path_precedence() {
        let cfg = GeneratorConfig::default();
        let group = Group::new(vec![]).with_annotation("group", "admin");
        let plain = Route::new("statsHandler");
        let nested = Route::new("reportHandler").with_annotation("group", "admin/reports");

        assert_eq!(folder_path(&group, &plain, &cfg), "internal/handler/admin");
        assert_eq!(folder_path(&group, &nested, &cfg), "internal/handler/admin/reports");
        assert_eq!(logic_folder_path(&group, &nested, &cfg), "internal/logic/admin/reports");
        assert_eq!(folder_path(&Group::default(), &plain, &cfg), HANDLER_DIR);
    }

    #[test]
    fn test_folder_path_normalizes_slashes() {
        let cfg = GeneratorConfig::default();
        let slashes = Group::new(vec![]).with_annotation("group", "///");
        let padded = Group::new(vec![]).with_annotation("group", "/user//");
        let route = Route::new("getHandler");
        assert_eq!(folder_path(&slashes, &route, &cfg), HANDLER_DIR);
        assert_eq!(folder_path(&padded, &route, &cfg), "internal/handler/user");
    }

    #[test]
    fn test_auth_subject() {
        let cfg = GeneratorConfig::default();
        let products = Group::new(vec![]).with_annotation("group", "products");
        let subject = auth_subject(&products, &cfg).unwrap();
        assert_eq!(subject.ident, "Product");
        assert_eq!(subject.snake, "product");
        assert_eq!(subject.policy_key, "products");

        let roles = Group::new(vec![]).with_annotation("group", "user_roles");
        let subject = auth_subject(&roles, &cfg).unwrap();
        assert_eq!(subject.ident, "UserRole");
        assert_eq!(subject.snake, "user_role");
        assert_eq!(subject.policy_key, "user_roles");

        assert!(auth_subject(&Group::default(), &cfg).is_none());
        assert!(auth_subject(&Group::new(vec![]).with_annotation("group", "s"), &cfg).is_none());
    }

    #[test]
    fn test_join_packages() {
        assert_eq!(
            join_packages(&["example.com/shop/", "/internal/logic/admin"]),
            "example.com/shop/internal/logic/admin"
        );
        assert_eq!(join_packages(&["", "internal/svc"]), "internal/svc");
        assert_eq!(leaf_segment("internal/handler/admin"), "admin");
        assert_eq!(leaf_segment(HANDLER_DIR), "handler");
    }
}
