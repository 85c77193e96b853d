//! Flat permission records and the tree view derived from them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PermissionError;

use super::code::PermissionCode;
use super::kind::PermissionType;

/// One permission as stored by a backend: `{ code, name, type, parentCode? }`.
///
/// Codes stay plain strings here so that a malformed row from a backend
/// degrades the tree instead of rejecting the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PermissionType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub route_name: Option<String>,
}

impl PermissionRecord {
    pub fn new(code: &PermissionCode, name: impl Into<String>) -> Self {
        PermissionRecord {
            code: code.to_string(),
            name: name.into(),
            kind: code.kind().permission_type(),
            parent_code: None,
            route_name: None,
        }
    }

    pub fn with_parent(mut self, parent: &PermissionCode) -> Self {
        self.parent_code = Some(parent.to_string());
        self
    }

    pub fn with_route_name(mut self, route_name: impl Into<String>) -> Self {
        self.route_name = Some(route_name.into());
        self
    }

    pub fn is_menu(&self) -> bool {
        self.kind == PermissionType::Menu
    }

    pub fn is_button(&self) -> bool {
        self.kind == PermissionType::Button
    }

    /// Validate and return the record's code.
    pub fn parsed_code(&self) -> Result<PermissionCode, PermissionError> {
        PermissionCode::parse(&self.code)
    }
}

/// A record built from the nested configuration, with its display-name path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltPermission {
    #[serde(flatten)]
    pub record: PermissionRecord,
    /// Display names from the root down to this record, inclusive.
    pub path: Vec<String>,
}

impl BuiltPermission {
    pub fn code(&self) -> &str {
        &self.record.code
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn parent_code(&self) -> Option<&str> {
        self.record.parent_code.as_deref()
    }
}

/// A record plus its children, as shown on a permission-management screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionNode {
    #[serde(flatten)]
    pub record: PermissionRecord,
    pub children: Vec<PermissionNode>,
}

impl PermissionNode {
    pub fn leaf(record: PermissionRecord) -> Self {
        PermissionNode {
            record,
            children: Vec::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.record.code
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(PermissionNode::size).sum::<usize>()
    }
}
