//! Route-guard decisions and the default redirect.
//!
//! The guard itself belongs to the host router. These functions are the
//! decision steps it runs once the permission data is loaded.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PermissionError;
use crate::menu::find_first_leaf_name;
use crate::traits::Navigator;
use crate::types::{GrantedSet, NavigationNode};

/// Route name used when nothing is reachable.
pub const NOT_FOUND_ROUTE: &str = "not-found";

/// Where a navigation is going.
#[derive(Debug, Clone, Copy)]
pub enum RouteTarget<'a> {
    /// The default/home path, which always redirects.
    Home,
    /// A concrete route.
    Route(&'a NavigationNode),
}

/// What the guard should do with a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
    NotFound,
}

/// Decide a navigation against a loaded grant set.
///
/// `menus` is the already filtered menu tree; the home target redirects to
/// its first leaf. A route without an annotation, or with one that is not
/// granted, is not found.
pub fn guard_route(
    target: RouteTarget<'_>,
    granted: &GrantedSet,
    menus: &[NavigationNode],
) -> GuardDecision {
    let decision = match target {
        RouteTarget::Home => match find_first_leaf_name(menus) {
            Some(name) => GuardDecision::Redirect(name),
            None => GuardDecision::NotFound,
        },
        RouteTarget::Route(node) => match node.menu_id() {
            Some(menu_id) if granted.contains(menu_id) => GuardDecision::Allow,
            _ => GuardDecision::NotFound,
        },
    };

    debug!(event = "RouteGuard", phase = "Decision", decision = ?decision);
    decision
}

/// Send the navigator to the first authorized page, or to `not-found`.
///
/// Returns whether an authorized page was found.
pub fn redirect_to_first_authorized<N: Navigator + ?Sized>(
    navigator: &N,
    menus: &[NavigationNode],
) -> Result<bool, PermissionError> {
    match find_first_leaf_name(menus) {
        Some(name) => {
            info!(event = "RouteGuard", phase = "Redirect", target = name.as_str());
            navigator.replace(&name)?;
            Ok(true)
        }
        None => {
            info!(event = "RouteGuard", phase = "Redirect", target = NOT_FOUND_ROUTE);
            navigator.replace(NOT_FOUND_ROUTE)?;
            Ok(false)
        }
    }
}
