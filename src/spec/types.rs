use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Annotation mapping attached to a group or a route.
///
/// Keys are annotation names (`group`, `auth`, ...). Values are free-form strings;
/// an empty or whitespace-only value is treated the same as an absent key.
pub type Annotations = BTreeMap<String, String>;

fn lookup<'a>(annotations: &'a Annotations, key: &str) -> Option<&'a str> {
    annotations
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// The full input for one generation run.
///
/// Group order is significant: it drives error-code allocation and emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteGraph {
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl RouteGraph {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Total number of routes across all groups.
    pub fn route_count(&self) -> usize {
        self.groups.iter().map(|g| g.routes.len()).sum()
    }
}

/// An ordered set of routes sharing group-level annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Optional display name, only used when reporting errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl Group {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            name: None,
            annotations: Annotations::new(),
            routes,
        }
    }

    /// Builder-style helper to attach an annotation.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the trimmed annotation value, or `None` when absent or blank.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        lookup(&self.annotations, key)
    }
}

/// A single route: handler token, payload type names, docs and annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub handler: String,
    #[serde(default, alias = "request")]
    pub request_type: String,
    #[serde(default, alias = "response")]
    pub response_type: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub annotations: Annotations,
}

impl Route {
    pub fn new(handler: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            ..Self::default()
        }
    }

    pub fn with_request(mut self, ty: impl Into<String>) -> Self {
        self.request_type = ty.into();
        self
    }

    pub fn with_response(mut self, ty: impl Into<String>) -> Self {
        self.response_type = ty.into();
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Returns the trimmed annotation value, or `None` when absent or blank.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        lookup(&self.annotations, key)
    }

    pub fn has_request(&self) -> bool {
        !self.request_type.trim().is_empty()
    }

    pub fn has_response(&self) -> bool {
        !self.response_type.trim().is_empty()
    }

    pub fn has_doc(&self) -> bool {
        !self.doc.trim().is_empty()
    }
}
