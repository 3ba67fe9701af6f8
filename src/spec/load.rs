use super::types::RouteGraph;
use anyhow::Context;
use std::path::Path;

/// Load a route graph from a YAML (`.yaml`/`.yml`) or JSON file.
///
/// The graph is the output of an upstream parser; this loader only deserializes it.
pub fn load_graph(path: &Path) -> anyhow::Result<RouteGraph> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read route graph: {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let graph: RouteGraph = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML route graph: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON route graph: {}", path.display()))?
    };
    tracing::debug!(
        path = %path.display(),
        groups = graph.groups.len(),
        routes = graph.route_count(),
        "loaded route graph"
    );
    Ok(graph)
}
