use crate::config::PermissionConfig;
use crate::error::PermissionError;

/// Parse JSON permission configuration text into a `PermissionConfig`.
///
/// JSON syntax errors and a non-object root are mapped into
/// `PermissionError::ConfigurationError`. Key order is preserved.
///
/// Example:
/// ```rust
/// use permtree_core::load_config;
/// let text = r#"{ "M01": { "name": "Users", "A0101": { "name": "Add" } } }"#;
/// let config = load_config(text).unwrap();
/// assert_eq!(config.len(), 1);
/// ```
pub fn load_config(text: &str) -> Result<PermissionConfig, PermissionError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    PermissionConfig::from_value(value)
}
