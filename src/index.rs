//! Lookups over a flat permission list, as received from a backend.

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;

use crate::tree::permission_tree;
use crate::types::{CheckMode, GrantedSet, PermissionNode, PermissionRecord};

/// Group key for actions whose parent is unknown.
pub const UNGROUPED_ACTIONS: &str = "other";

/// An indexed flat permission list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionIndex {
    records: Vec<PermissionRecord>,
    by_code: HashMap<String, usize>,
}

impl PermissionIndex {
    pub fn new(records: Vec<PermissionRecord>) -> Self {
        let mut by_code = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            by_code.entry(record.code.clone()).or_insert(i);
        }
        PermissionIndex { records, by_code }
    }

    pub fn records(&self) -> &[PermissionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_code(&self, code: &str) -> Option<&PermissionRecord> {
        self.by_code.get(code).map(|&i| &self.records[i])
    }

    /// The menu permission bound to a route name.
    pub fn by_route_name(&self, route_name: &str) -> Option<&PermissionRecord> {
        self.records
            .iter()
            .find(|r| r.is_menu() && r.route_name.as_deref() == Some(route_name))
    }

    /// Buttons whose parent is `menu_code`.
    pub fn buttons_for_menu(&self, menu_code: &str) -> Vec<&PermissionRecord> {
        self.records
            .iter()
            .filter(|r| r.is_button() && r.parent_code.as_deref() == Some(menu_code))
            .collect()
    }

    /// Buttons of the menu bound to `route_name`.
    pub fn buttons_for_route(&self, route_name: &str) -> Vec<&PermissionRecord> {
        match self.by_route_name(route_name) {
            Some(menu) => self.buttons_for_menu(&menu.code),
            None => Vec::new(),
        }
    }

    /// Check menu access by route name, falling back to treating the
    /// argument as a code when no menu is bound to it.
    pub fn has_menu_permission(&self, route_or_code: &str, granted: &GrantedSet) -> bool {
        let code = self
            .by_route_name(route_or_code)
            .map_or(route_or_code, |menu| menu.code.as_str());
        granted.has_permission(&[code], CheckMode::Any)
    }

    /// Granted menus, in list order.
    pub fn authorized_menus(&self, granted: &GrantedSet) -> Vec<&PermissionRecord> {
        self.records
            .iter()
            .filter(|r| r.is_menu() && granted.contains(&r.code))
            .collect()
    }

    /// Granted buttons grouped by parent code.
    pub fn authorized_actions(
        &self,
        granted: &GrantedSet,
    ) -> BTreeMap<String, Vec<&PermissionRecord>> {
        let mut grouped: BTreeMap<String, Vec<&PermissionRecord>> = BTreeMap::new();
        for record in self
            .records
            .iter()
            .filter(|r| r.is_button() && granted.contains(&r.code))
        {
            let key = record
                .parent_code
                .clone()
                .unwrap_or_else(|| UNGROUPED_ACTIONS.to_string());
            grouped.entry(key).or_default().push(record);
        }
        grouped
    }

    /// Route of the first granted menu, by code order.
    ///
    /// A menu with granted, routed sub-menus yields its first sub-menu's
    /// route; otherwise its own route if it has one.
    pub fn first_authorized_route(&self, granted: &GrantedSet) -> Option<String> {
        let menus = self
            .authorized_menus(granted)
            .into_iter()
            .sorted_by(|a, b| a.code.cmp(&b.code));

        for menu in menus {
            let first_child = self
                .records
                .iter()
                .filter(|r| {
                    r.is_menu()
                        && r.parent_code.as_deref() == Some(menu.code.as_str())
                        && r.route_name.is_some()
                        && granted.contains(&r.code)
                })
                .min_by(|a, b| a.code.cmp(&b.code));

            if let Some(route) = first_child.and_then(|c| c.route_name.clone()) {
                return Some(route);
            }
            if let Some(route) = &menu.route_name {
                return Some(route.clone());
            }
        }
        None
    }

    pub fn tree(&self) -> Vec<PermissionNode> {
        permission_tree(&self.records)
    }
}

impl From<Vec<PermissionRecord>> for PermissionIndex {
    fn from(records: Vec<PermissionRecord>) -> Self {
        PermissionIndex::new(records)
    }
}
