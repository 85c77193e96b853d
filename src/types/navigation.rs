//! Host-owned navigation (route/menu) nodes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the route metadata object.
pub const META_KEY: &str = "meta";
/// Key of the permission annotation, directly on the node or inside `meta`.
pub const MENU_ID_KEY: &str = "menuId";

/// A node of the host's navigation tree: `{ name?, menuId?, children? }`.
///
/// Any other field (`path`, `meta`, icons, ...) is kept in `extra` and
/// carried through clones untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationNode {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub menu_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub children: Option<Vec<NavigationNode>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NavigationNode {
    pub fn new(name: impl Into<String>) -> Self {
        NavigationNode {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_menu_id(mut self, menu_id: impl Into<String>) -> Self {
        self.menu_id = Some(menu_id.into());
        self
    }

    pub fn with_children(mut self, children: Vec<NavigationNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Set an opaque field, e.g. `path` or `meta`.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The node's permission annotation.
    ///
    /// `meta.menuId` takes precedence over a top-level `menuId`; an empty
    /// string counts as no annotation.
    pub fn menu_id(&self) -> Option<&str> {
        self.extra
            .get(META_KEY)
            .and_then(|meta| meta.get(MENU_ID_KEY))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .or_else(|| self.menu_id.as_deref().filter(|id| !id.is_empty()))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Children, or an empty slice when the node has none.
    pub fn child_nodes(&self) -> &[NavigationNode] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn has_children(&self) -> bool {
        !self.child_nodes().is_empty()
    }
}
