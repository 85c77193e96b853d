//! Data model types for permission codes, records and navigation trees.
//!
//! Canonical string forms:
//! - Menu code: `M` + 2-digit groups, e.g. `M01`, `M0101`
//! - Action code: `A` + 2-digit groups, e.g. `A010101` (an action on `M0101`)
//! - Record type: `menu` or `button`
//!
//! Each group is a number in `01..=99`; depth is the number of groups.

mod code;
mod granted;
mod kind;
mod navigation;
mod record;

pub use code::{
    GROUP_WIDTH, PermissionCode, PermissionCodeInfo, is_child_of, is_valid_code, parent_codes,
    parse_code, root_code,
};
pub use granted::{CheckMode, GrantedSet};
pub use kind::{CodeKind, PermissionType};
pub use navigation::{META_KEY, MENU_ID_KEY, NavigationNode};
pub use record::{BuiltPermission, PermissionNode, PermissionRecord};
