//! Structural validation of a nested permission configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{ConfigNode, PermissionConfig};
use crate::error::PermissionError;
use crate::types::PermissionCode;

/// Outcome of [`validate_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<PermissionError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<PermissionError>) -> Self {
        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// The errors rendered as plain messages.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Check a configuration without building it.
///
/// Reported as `ConfigurationError`: keys that are neither metadata nor valid
/// codes, nodes that are not objects with a `name`, and codes that appear
/// more than once anywhere in the configuration.
///
/// Reported as `StructuralViolation`: a code nested under an action, and a
/// code whose digits do not descend from the code it is nested under.
///
/// An action's menu equivalent shares its digits, so any action key that
/// parses already maps to a legal menu code and needs no separate check.
pub fn validate_config(config: &PermissionConfig) -> ValidationReport {
    let mut walker = Walker::default();
    for (key, value) in config.roots() {
        walker.visit(key, value, None, "");
    }
    ValidationReport::from_errors(walker.errors)
}

#[derive(Default)]
struct Walker {
    seen: HashMap<String, String>,
    errors: Vec<PermissionError>,
}

impl Walker {
    fn visit(&mut self, key: &str, value: &Value, parent: Option<&PermissionCode>, at: &str) {
        let location = if at.is_empty() {
            key.to_string()
        } else {
            format!("{at}.{key}")
        };

        let code = match PermissionCode::parse(key) {
            Ok(code) => code,
            Err(err) => {
                self.errors.push(PermissionError::ConfigurationError(format!(
                    "key '{location}' is neither metadata nor a permission code ({err})"
                )));
                return;
            }
        };

        if let Some(first) = self.seen.get(code.as_str()) {
            self.errors.push(PermissionError::ConfigurationError(format!(
                "duplicate permission code '{code}' at '{location}', first defined at '{first}'"
            )));
        } else {
            self.seen.insert(code.to_string(), location.clone());
        }

        if let Some(parent) = parent {
            if parent.is_action() {
                self.errors.push(PermissionError::StructuralViolation(format!(
                    "'{code}' at '{location}' is nested under action '{parent}'"
                )));
            } else if !code.is_descendant_of(parent) {
                self.errors.push(PermissionError::StructuralViolation(format!(
                    "'{code}' at '{location}' does not descend from '{parent}'"
                )));
            }
        }

        let node = match ConfigNode::from_value(value) {
            Ok(node) => node,
            Err(reason) => {
                self.errors.push(PermissionError::ConfigurationError(format!(
                    "node '{location}': {reason}"
                )));
                return;
            }
        };

        for (child_key, child) in node.entries() {
            self.visit(child_key, child, Some(&code), &location);
        }
    }
}
