// src/lib.rs
pub use builder::{BuiltPermissions, build_permissions};
pub use config::{MenuOptions, PermissionConfig};
pub use error::PermissionError;
pub use guard::{
    GuardDecision, NOT_FOUND_ROUTE, RouteTarget, guard_route, redirect_to_first_authorized,
};
pub use index::PermissionIndex;
pub use loader::load_config;
pub use menu::{filter_tree, find_first_leaf_name, find_parent_keys, menu_list, routes_with_menu_id};
pub use registry::PermissionRegistry;
pub use store::PermissionStore;
pub use traits::{Navigator, PermissionSource, RouteSource};
pub use tree::permission_tree;
pub use types::{
    BuiltPermission, CheckMode, CodeKind, GrantedSet, NavigationNode, PermissionCode,
    PermissionCodeInfo, PermissionNode, PermissionRecord, PermissionType, is_child_of,
    is_valid_code, parent_codes, parse_code, root_code,
};
pub use validate::{ValidationReport, validate_config};

pub mod config;
pub mod export;
pub mod types;

mod builder;
mod error;
mod guard;
mod index;
mod loader;
mod menu;
mod registry;
mod store;
mod traits;
mod tree;
mod validate;
