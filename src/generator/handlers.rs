//! Handler emitter: one handler artifact per route.

use super::casing::title;
use super::format::NamingFormat;
use super::naming::{
    base_name, folder_path, group_label, handler_name, join_packages, leaf_segment,
    logic_folder_path, logic_name, CONTEXT_DIR, DEFAULT_LOGIC_PACKAGE, HANDLER_DIR, TYPES_DIR,
};
use super::templates::{Artifact, ArtifactKind, Renderer, HANDLER_TEMPLATE};
use crate::config::GeneratorConfig;
use crate::error::{GenError, RouteRef};
use crate::spec::{Group, Route, RouteGraph};
use serde::Serialize;
use std::path::PathBuf;

/// Data bound to the handler template.
///
/// `has_request`, `has_response` and `has_doc` are decided here; the template only
/// chooses what to emit for each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerTemplateData {
    /// Go package of the handler file (leaf of its folder)
    pub pkg_name: String,
    /// Import paths, in emission order
    pub imports: Vec<String>,
    /// Exported handler identifier
    pub handler_name: String,
    /// Request type name, title-cased (empty when absent)
    pub request_type: String,
    /// Package holding the paired logic type
    pub logic_package: String,
    /// Paired logic type, title-cased
    pub logic_type: String,
    /// Logic method invoked by the handler
    pub call: String,
    pub has_request: bool,
    pub has_response: bool,
    pub has_doc: bool,
    /// Rendered doc comment (empty when absent)
    pub doc: String,
}

/// Resolved placement and template data for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerPlan {
    /// Folder relative to the output root
    pub folder: String,
    /// File name including extension
    pub file_name: String,
    pub data: HandlerTemplateData,
}

impl HandlerPlan {
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.folder).join(&self.file_name)
    }
}

/// Doc comment lines: surrounding quotes trimmed, each prefixed with `// `.
pub fn format_doc(doc: &str) -> String {
    doc.trim()
        .lines()
        .map(|line| format!("// {}", line.trim().trim_matches('"').trim()).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Import paths a handler needs: its logic package, the service context and,
/// when the route binds a request, the types package.
pub fn handler_imports(group: &Group, route: &Route, cfg: &GeneratorConfig) -> Vec<String> {
    let root = cfg.root_package.as_str();
    let mut imports = vec![
        join_packages(&[root, &logic_folder_path(group, route, cfg)]),
        join_packages(&[root, CONTEXT_DIR]),
    ];
    if route.has_request() {
        imports.push(join_packages(&[root, TYPES_DIR]));
    }
    imports
}

/// Resolve naming and placement for one route.
///
/// # Errors
///
/// Returns [`GenError::NamingResolution`] when the handler token is unusable.
pub fn plan_handler(
    group_index: usize,
    group: &Group,
    route_index: usize,
    route: &Route,
    cfg: &GeneratorConfig,
    naming: &NamingFormat,
) -> Result<HandlerPlan, GenError> {
    let base = base_name(route, || RouteRef {
        group: group_label(group_index, group, cfg),
        route: route_index,
        handler: route.handler.clone(),
    })?;
    let folder = folder_path(group, route, cfg);
    let pkg_name = leaf_segment(&folder).to_string();

    let mut handler = handler_name(&base);
    let mut logic_package = DEFAULT_LOGIC_PACKAGE.to_string();
    if folder != HANDLER_DIR {
        // sub-grouped handlers are exported from their own package and call a
        // logic package of the same leaf name
        handler = title(&handler);
        logic_package = pkg_name.clone();
    }

    let file_name = format!("{}.go", naming.apply(&handler));
    let data = HandlerTemplateData {
        pkg_name,
        imports: handler_imports(group, route, cfg),
        request_type: title(route.request_type.trim()),
        logic_package,
        logic_type: title(&logic_name(&base)),
        call: title(&base),
        has_request: route.has_request(),
        has_response: route.has_response(),
        has_doc: route.has_doc(),
        doc: format_doc(&route.doc),
        handler_name: handler,
    };
    Ok(HandlerPlan {
        folder,
        file_name,
        data,
    })
}

/// Render the handler artifact for one route.
///
/// # Errors
///
/// Propagates naming and template failures.
pub fn emit_handler(
    renderer: &Renderer<'_>,
    plan: HandlerPlan,
) -> Result<Artifact, GenError> {
    let path = plan.path();
    renderer.render(ArtifactKind::Handler, HANDLER_TEMPLATE, path, plan.data)
}

/// Render every handler of one group, in route order.
///
/// # Errors
///
/// Stops at the first naming or template failure.
pub fn emit_group_handlers(
    renderer: &Renderer<'_>,
    cfg: &GeneratorConfig,
    naming: &NamingFormat,
    group_index: usize,
    group: &Group,
) -> Result<Vec<Artifact>, GenError> {
    group
        .routes
        .iter()
        .enumerate()
        .map(|(route_index, route)| {
            let plan = plan_handler(group_index, group, route_index, route, cfg, naming)?;
            emit_handler(renderer, plan)
        })
        .collect()
}

/// Plan every handler in the graph without rendering, in graph order.
///
/// # Errors
///
/// Stops at the first naming failure.
pub fn plan_handlers(
    graph: &RouteGraph,
    cfg: &GeneratorConfig,
    naming: &NamingFormat,
) -> Result<Vec<HandlerPlan>, GenError> {
    let mut plans = Vec::with_capacity(graph.route_count());
    for (group_index, group) in graph.groups.iter().enumerate() {
        for (route_index, route) in group.routes.iter().enumerate() {
            plans.push(plan_handler(group_index, group, route_index, route, cfg, naming)?);
        }
    }
    Ok(plans)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::generator::TemplateRegistry;

    fn cfg() -> GeneratorConfig {
        GeneratorConfig::new("example.com/shop")
    }

    #[test]
    fn test_default_folder_plan() {
        let group = Group::new(vec![]);
        let route = Route::new("listHandler").with_response("ListResp");
        let plan = plan_handler(0, &group, 0, &route, &cfg(), &NamingFormat::default()).unwrap();

        assert_eq!(plan.path(), PathBuf::from("internal/handler/listhandler.go"));
        assert_eq!(plan.data.pkg_name, "handler");
        assert_eq!(plan.data.handler_name, "listHandler");
        assert_eq!(plan.data.logic_package, "logic");
        assert_eq!(plan.data.logic_type, "ListLogic");
        assert_eq!(plan.data.call, "List");
        assert_eq!(
            plan.data.imports,
            vec!["example.com/shop/internal/logic", "example.com/shop/internal/svc"]
        );
        assert!(!plan.data.has_request);
        assert!(plan.data.has_response);
        assert!(!plan.data.has_doc);
    }

    #[test]
    fn test_sub_folder_plan_uses_leaf_package() {
        let group = Group::new(vec![]).with_annotation("group", "admin");
        let route = Route::new("exportHandler")
            .with_request("exportReq")
            .with_annotation("group", "admin/reports");
        let naming = NamingFormat::parse("go_zero").unwrap();
        let plan = plan_handler(0, &group, 0, &route, &cfg(), &naming).unwrap();

        assert_eq!(plan.folder, "internal/handler/admin/reports");
        assert_eq!(plan.file_name, "export_handler.go");
        assert_eq!(plan.data.pkg_name, "reports");
        assert_eq!(plan.data.handler_name, "ExportHandler");
        assert_eq!(plan.data.logic_package, "reports");
        assert_eq!(plan.data.request_type, "ExportReq");
        assert_eq!(
            plan.data.imports,
            vec![
                "example.com/shop/internal/logic/admin/reports",
                "example.com/shop/internal/svc",
                "example.com/shop/internal/types",
            ]
        );
    }

    #[test]
    fn test_format_doc() {
        assert_eq!(format_doc("\"list all products\""), "// list all products");
        assert_eq!(format_doc("first\nsecond"), "// first\n// second");
        assert_eq!(format_doc("\"a\"\n\"b\""), "// a\n// b");
        assert_eq!(format_doc("  \" padded \"  "), "// padded");
        assert_eq!(format_doc(""), "");
    }

    #[test]
    fn test_naming_failure_is_attributed() {
        let group = Group::new(vec![]).with_name("orders");
        let route = Route::new("Handler");
        let err = plan_handler(2, &group, 3, &route, &cfg(), &NamingFormat::default()).unwrap_err();
        match err {
            GenError::NamingResolution { location, .. } => {
                assert_eq!(location.group, "orders");
                assert_eq!(location.route, 3);
                assert_eq!(location.handler, "Handler");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rendered_handler_with_everything() {
        let registry = TemplateRegistry::builtin();
        let renderer = Renderer::new(&registry).unwrap();
        let group = Group::new(vec![]);
        let route = Route::new("createHandler")
            .with_request("CreateReq")
            .with_response("CreateResp")
            .with_doc("create a product");
        let plan = plan_handler(0, &group, 0, &route, &cfg(), &NamingFormat::default()).unwrap();
        let artifact = emit_handler(&renderer, plan).unwrap();
        let go = &artifact.contents;

        assert!(go.starts_with("// Code generated by routegen. DO NOT EDIT.\n\npackage handler\n"));
        assert!(go.contains("\t\"example.com/shop/internal/types\"\n"));
        assert!(go.contains("// create a product\nfunc createHandler(svcCtx *svc.ServiceContext) http.HandlerFunc {"));
        assert!(go.contains("var req types.CreateReq"));
        assert!(go.contains("l := logic.NewCreateLogic(r.Context(), svcCtx)"));
        assert!(go.contains("resp, err := l.Create(&req)"));
        assert!(go.contains("httpx.OkJsonCtx(r.Context(), w, resp)"));
    }

    #[test]
    fn test_rendered_handler_without_payloads() {
        let registry = TemplateRegistry::builtin();
        let renderer = Renderer::new(&registry).unwrap();
        let group = Group::new(vec![]);
        let route = Route::new("pingHandler");
        let plan = plan_handler(0, &group, 0, &route, &cfg(), &NamingFormat::default()).unwrap();
        let go = emit_handler(&renderer, plan).unwrap().contents;

        assert!(!go.contains("types."));
        assert!(!go.contains("\n//"));
        assert!(go.contains("\t\terr := l.Ping()\n"));
        assert!(go.contains("httpx.Ok(w)"));
        assert!(!go.contains("OkJsonCtx"));
    }
}
