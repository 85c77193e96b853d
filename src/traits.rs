use crate::error::PermissionError;
use crate::types::{NavigationNode, PermissionRecord};

/// Anything that can list the host's navigation tree, e.g. a router.
pub trait RouteSource {
    /// The route tree, top level first. Nodes are borrowed views of the
    /// host's routes and are never handed back mutated.
    fn list_routes(&self) -> Vec<NavigationNode>;
}

/// The host's navigation capability, used for redirects.
pub trait Navigator {
    /// Replace the current location with the route called `route_name`.
    fn replace(&self, route_name: &str) -> Result<(), PermissionError>;
}

/// Where the host gets permission data from, typically a backend API.
pub trait PermissionSource: Send + Sync {
    /// Codes granted to the current principal.
    fn fetch_permissions(&self) -> Result<Vec<String>, PermissionError>;

    /// Every permission known to the system, as a flat list.
    fn fetch_all_permissions(&self) -> Result<Vec<PermissionRecord>, PermissionError> {
        Ok(Vec::new())
    }
}

impl RouteSource for Vec<NavigationNode> {
    fn list_routes(&self) -> Vec<NavigationNode> {
        self.clone()
    }
}

impl RouteSource for [NavigationNode] {
    fn list_routes(&self) -> Vec<NavigationNode> {
        self.to_vec()
    }
}
