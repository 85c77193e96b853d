//! Pruning a navigation tree to what a principal may see.
//!
//! All functions here borrow the input tree and return fresh nodes; the
//! host's route tree is never modified, since it doubles as the route schema.

use tracing::debug;

use crate::config::MenuOptions;
use crate::types::{GrantedSet, NavigationNode};

/// Keep the nodes whose annotation is granted, recursively.
///
/// A node without an annotation is dropped, as is a node whose annotation is
/// not in `granted`. A kept node whose children are all dropped stays, with
/// an empty child list.
pub fn filter_tree(nodes: &[NavigationNode], granted: &GrantedSet) -> Vec<NavigationNode> {
    prune(nodes, &|node| match node.menu_id() {
        Some(menu_id) if granted.contains(menu_id) => true,
        menu_id => {
            debug!(
                event = "MenuFilter",
                phase = "Drop",
                name = ?node.name(),
                menu_id = ?menu_id
            );
            false
        }
    })
}

/// Keep every annotated node, recursively, without checking grants.
pub fn routes_with_menu_id(nodes: &[NavigationNode]) -> Vec<NavigationNode> {
    prune(nodes, &|node| node.menu_id().is_some())
}

/// The menu to render for `granted` under `options`.
pub fn menu_list(
    nodes: &[NavigationNode],
    granted: &GrantedSet,
    options: &MenuOptions,
) -> Vec<NavigationNode> {
    if options.enforce_permissions {
        filter_tree(nodes, granted)
    } else {
        routes_with_menu_id(nodes)
    }
}

fn prune(nodes: &[NavigationNode], keep: &dyn Fn(&NavigationNode) -> bool) -> Vec<NavigationNode> {
    nodes
        .iter()
        .filter(|node| keep(node))
        .map(|node| NavigationNode {
            name: node.name.clone(),
            menu_id: node.menu_id.clone(),
            children: node.children.as_ref().map(|kids| prune(kids, keep)),
            extra: node.extra.clone(),
        })
        .collect()
}

/// The first navigable page, depth-first and left to right.
///
/// Children are searched before their parent is considered, so a menu with
/// sub-pages never wins over its first reachable sub-page.
pub fn find_first_leaf_name(nodes: &[NavigationNode]) -> Option<String> {
    for node in nodes {
        if let Some(name) = find_first_leaf_name(node.child_nodes()) {
            return Some(name);
        }
        if let Some(name) = node.name() {
            return Some(name.to_string());
        }
    }
    None
}

/// Names of the ancestors of the node called `target`, root first.
///
/// `Some(vec![])` for a top-level match and `None` when nothing matches.
/// Unnamed ancestors have no sidebar key and are left out. Used to expand
/// the sidebar down to the current page.
pub fn find_parent_keys(nodes: &[NavigationNode], target: &str) -> Option<Vec<String>> {
    let mut trail = Vec::new();
    search_parents(nodes, target, &mut trail).then_some(trail)
}

fn search_parents(nodes: &[NavigationNode], target: &str, trail: &mut Vec<String>) -> bool {
    for node in nodes {
        if node.name() == Some(target) {
            return true;
        }
        if node.has_children() {
            let pushed = match node.name() {
                Some(name) => {
                    trail.push(name.to_string());
                    true
                }
                None => false,
            };
            if search_parents(node.child_nodes(), target, trail) {
                return true;
            }
            if pushed {
                trail.pop();
            }
        }
    }
    false
}
