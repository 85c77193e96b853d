//! Nested permission configuration and menu options.
//!
//! The configuration is an object keyed by permission codes:
//!
//! ```json
//! { "M01": { "name": "Users", "routeName": "User", "A0101": { "name": "Add" } } }
//! ```
//!
//! `name` and `routeName` are metadata; every other key is expected to be a
//! code whose value is another node. Key order is display order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PermissionError;

/// Required display-name field of a node.
pub const NAME_KEY: &str = "name";
/// Optional routing hint of a node.
pub const ROUTE_NAME_KEY: &str = "routeName";

/// Keys that are never interpreted as permission codes.
pub const METADATA_KEYS: [&str; 2] = [NAME_KEY, ROUTE_NAME_KEY];

pub fn is_metadata_key(key: &str) -> bool {
    METADATA_KEYS.contains(&key)
}

/// The root of a nested permission configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionConfig(Map<String, Value>);

impl PermissionConfig {
    /// Wrap a JSON value; the root must be an object.
    pub fn from_value(value: Value) -> Result<Self, PermissionError> {
        match value {
            Value::Object(map) => Ok(PermissionConfig(map)),
            other => Err(PermissionError::ConfigurationError(format!(
                "permission configuration root must be an object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Combine module configurations; later modules override earlier keys.
    pub fn merge(modules: impl IntoIterator<Item = PermissionConfig>) -> Self {
        let mut merged = Map::new();
        for module in modules {
            merged.extend(module.0);
        }
        PermissionConfig(merged)
    }

    /// Root entries in configuration order.
    pub fn roots(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A configuration node viewed as `(name, routeName, child entries)`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConfigNode<'a> {
    pub(crate) name: &'a str,
    pub(crate) route_name: Option<&'a str>,
    map: &'a Map<String, Value>,
}

impl<'a> ConfigNode<'a> {
    /// View `value` as a node, or explain why it is not one.
    pub(crate) fn from_value(value: &'a Value) -> Result<Self, String> {
        let Value::Object(map) = value else {
            return Err(format!("expected an object, found {}", json_type_name(value)));
        };
        let Some(name) = map.get(NAME_KEY).and_then(Value::as_str) else {
            return Err(format!("missing string field '{NAME_KEY}'"));
        };
        Ok(ConfigNode {
            name,
            route_name: map.get(ROUTE_NAME_KEY).and_then(Value::as_str),
            map,
        })
    }

    /// Non-metadata entries in configuration order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let map: &'a Map<String, Value> = self.map;
        map.iter()
            .filter(|(k, _)| !is_metadata_key(k.as_str()))
            .map(|(k, v)| (k.as_str(), v))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Menu rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuOptions {
    /// Filter menus against the grant set. When off, every annotated
    /// route is listed.
    pub enforce_permissions: bool,
}

impl Default for MenuOptions {
    fn default() -> Self {
        MenuOptions {
            enforce_permissions: true,
        }
    }
}
