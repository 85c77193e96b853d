//! Flattening the nested configuration into permission records.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::{ConfigNode, PermissionConfig};
use crate::tree::permission_tree;
use crate::types::{BuiltPermission, PermissionCode, PermissionNode, PermissionRecord};

/// Records built from one configuration, in depth-first configuration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltPermissions {
    permissions: Vec<BuiltPermission>,
    by_code: HashMap<String, usize>,
}

impl BuiltPermissions {
    pub fn permissions(&self) -> &[BuiltPermission] {
        &self.permissions
    }

    /// The flat records without their paths, as a backend would store them.
    pub fn records(&self) -> Vec<PermissionRecord> {
        self.permissions.iter().map(|p| p.record.clone()).collect()
    }

    /// Lookup by code. With duplicate codes the first one built wins.
    pub fn get(&self, code: &str) -> Option<&BuiltPermission> {
        self.by_code.get(code).map(|&i| &self.permissions[i])
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    pub fn tree(&self) -> Vec<PermissionNode> {
        permission_tree(&self.records())
    }

    /// Find a code by its display-name path, e.g. `["Settings", "Roles", "Add"]`.
    pub fn code_for_path<S: AsRef<str>>(&self, names: &[S]) -> Option<&str> {
        if names.is_empty() {
            return None;
        }
        self.permissions
            .iter()
            .find(|p| {
                p.path.len() == names.len()
                    && p.path.iter().zip(names).all(|(a, b)| a == b.as_ref())
            })
            .map(BuiltPermission::code)
    }

    fn push(&mut self, permission: BuiltPermission) {
        let index = self.permissions.len();
        let code = permission.code().to_string();
        if self.by_code.contains_key(&code) {
            warn!(
                event = "BuildPermissions",
                phase = "Duplicate",
                code = code,
                "duplicate permission code, lookups keep the first"
            );
        } else {
            self.by_code.insert(code, index);
        }
        self.permissions.push(permission);
    }
}

/// Walk the configuration depth-first and flatten it into records.
///
/// This never fails: invalid keys and malformed nodes are logged and
/// skipped together with their subtrees.
pub fn build_permissions(config: &PermissionConfig) -> BuiltPermissions {
    let mut built = BuiltPermissions::default();

    for (key, value) in config.roots() {
        let Ok(code) = PermissionCode::parse(key) else {
            error!(
                event = "BuildPermissions",
                phase = "Root",
                key = key,
                "invalid root permission code, skipped"
            );
            continue;
        };
        build_node(&mut built, code, value, None, &[]);
    }

    debug!(
        event = "BuildPermissions",
        phase = "Done",
        count = built.len()
    );
    built
}

fn build_node(
    built: &mut BuiltPermissions,
    code: PermissionCode,
    value: &Value,
    parent: Option<&PermissionCode>,
    path: &[String],
) {
    let node = match ConfigNode::from_value(value) {
        Ok(node) => node,
        Err(reason) => {
            warn!(
                event = "BuildPermissions",
                phase = "Node",
                code = code.as_str(),
                reason = reason,
                "malformed permission node, skipped"
            );
            return;
        }
    };

    let mut current_path = path.to_vec();
    current_path.push(node.name.to_string());

    let mut record = PermissionRecord::new(&code, node.name);
    if let Some(parent) = parent {
        record = record.with_parent(parent);
    }
    if let Some(route_name) = node.route_name {
        record = record.with_route_name(route_name);
    }

    built.push(BuiltPermission {
        record,
        path: current_path.clone(),
    });

    for (key, child) in node.entries() {
        match PermissionCode::parse(key) {
            Ok(child_code) => build_node(built, child_code, child, Some(&code), &current_path),
            Err(_) => {
                warn!(
                    event = "BuildPermissions",
                    phase = "Node",
                    parent = code.as_str(),
                    key = key,
                    "invalid permission code, skipped"
                );
            }
        }
    }
}
