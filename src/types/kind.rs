//! Code prefixes and permission record types.
//!
//! A code's prefix decides its kind: `M` for menus, `A` for actions. Records
//! coming from configuration or a backend carry the matching record type,
//! `menu` or `button`.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// The kind of a permission code, as given by its prefix letter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CodeKind {
    /// A menu entry (`M01`, `M0101`)
    Menu,
    /// An action or button inside a menu (`A010101`)
    Action,
}

impl CodeKind {
    pub const MENU_PREFIX: char = 'M';
    pub const ACTION_PREFIX: char = 'A';

    /// The prefix letter for this kind.
    pub fn prefix(&self) -> char {
        match self {
            Self::Menu => Self::MENU_PREFIX,
            Self::Action => Self::ACTION_PREFIX,
        }
    }

    /// Map a prefix letter back to a kind.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            Self::MENU_PREFIX => Some(Self::Menu),
            Self::ACTION_PREFIX => Some(Self::Action),
            _ => None,
        }
    }

    /// The record type used for codes of this kind.
    pub fn permission_type(&self) -> PermissionType {
        match self {
            Self::Menu => PermissionType::Menu,
            Self::Action => PermissionType::Button,
        }
    }
}

/// The `type` column of a permission record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PermissionType {
    Menu,
    Button,
}
