use super::*;
use crate::types::PermissionType;
use yare::parameterized;

mod build;
mod reload;

const USERS_CONFIG: &str = r#"
{
    "M01": {
        "name": "Users",
        "routeName": "User",
        "A0101": { "name": "Add" },
        "A0102": { "name": "Edit" }
    }
}
"#;

const SETTINGS_CONFIG: &str = r#"
{
    "M03": {
        "name": "Settings",
        "M0303": { "name": "Permissions", "routeName": "PermissionList" },
        "M0301": {
            "name": "Roles",
            "routeName": "RoleList",
            "A030101": { "name": "Add" }
        }
    }
}
"#;

const BROKEN_CONFIG: &str = r#"
{
    "M01": { "name": "Users",
        "A0101": { "name": "Add", "A010101": { "name": "Too deep" } } },
    "Z01": { "name": "Bogus" }
}
"#;

fn registry_from(config_text: &str) -> PermissionRegistry {
    PermissionRegistry::new_from_str(config_text).expect("config should load")
}

fn codes(built: &BuiltPermissions) -> Vec<&str> {
    built.permissions().iter().map(|p| p.code()).collect()
}
