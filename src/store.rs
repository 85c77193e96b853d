//! Per-session permission state, loaded once from a [`PermissionSource`].

use std::sync::{Arc, Mutex};

use tracing::{debug, error, info};

use crate::config::MenuOptions;
use crate::error::PermissionError;
use crate::guard::{GuardDecision, RouteTarget, guard_route};
use crate::index::PermissionIndex;
use crate::menu::menu_list;
use crate::traits::{PermissionSource, RouteSource};
use crate::types::{CheckMode, GrantedSet, NavigationNode, PermissionNode, PermissionRecord};

/// What one load produced. A part whose fetch failed is empty.
#[derive(Debug)]
struct LoadedPermissions {
    granted: GrantedSet,
    index: PermissionIndex,
}

/// Lazily loaded grants for the current principal.
///
/// The first caller that needs the data fetches it; concurrent callers wait
/// on the same load instead of issuing their own. The grant set and the
/// permission list are fetched independently; a failed fetch leaves its
/// part empty, so a failed grant fetch means nothing is granted.
pub struct PermissionStore {
    source: Arc<dyn PermissionSource>,
    options: MenuOptions,
    loaded: Mutex<Option<Arc<LoadedPermissions>>>,
}

impl PermissionStore {
    pub fn new(source: Arc<dyn PermissionSource>) -> Self {
        PermissionStore::with_options(source, MenuOptions::default())
    }

    pub fn with_options(source: Arc<dyn PermissionSource>, options: MenuOptions) -> Self {
        PermissionStore {
            source,
            options,
            loaded: Mutex::new(None),
        }
    }

    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    /// Load the permission data if it is not loaded yet.
    pub fn init(&self) -> Result<(), PermissionError> {
        self.ensure_loaded().map(|_| ())
    }

    pub fn is_loaded(&self) -> Result<bool, PermissionError> {
        Ok(self.loaded.lock()?.is_some())
    }

    /// Drop the loaded data, e.g. on logout. The next access fetches again.
    pub fn reset(&self) -> Result<(), PermissionError> {
        *self.loaded.lock()? = None;
        info!(event = "PermissionStore", phase = "Reset");
        Ok(())
    }

    pub fn granted(&self) -> Result<GrantedSet, PermissionError> {
        Ok(self.ensure_loaded()?.granted.clone())
    }

    pub fn has_permission<S: AsRef<str>>(
        &self,
        codes: &[S],
        mode: CheckMode,
    ) -> Result<bool, PermissionError> {
        Ok(self.ensure_loaded()?.granted.has_permission(codes, mode))
    }

    /// Every known permission, as fetched.
    pub fn records(&self) -> Result<Vec<PermissionRecord>, PermissionError> {
        Ok(self.ensure_loaded()?.index.records().to_vec())
    }

    pub fn index(&self) -> Result<PermissionIndex, PermissionError> {
        Ok(self.ensure_loaded()?.index.clone())
    }

    pub fn permission_tree(&self) -> Result<Vec<PermissionNode>, PermissionError> {
        Ok(self.ensure_loaded()?.index.tree())
    }

    /// The menu for the host's routes under this store's options.
    pub fn menu_list(
        &self,
        routes: &dyn RouteSource,
    ) -> Result<Vec<NavigationNode>, PermissionError> {
        let loaded = self.ensure_loaded()?;
        Ok(menu_list(&routes.list_routes(), &loaded.granted, &self.options))
    }

    /// Load if needed, then decide a navigation.
    pub fn check_navigation(
        &self,
        target: RouteTarget<'_>,
        routes: &dyn RouteSource,
    ) -> Result<GuardDecision, PermissionError> {
        let loaded = self.ensure_loaded()?;
        let menus = menu_list(&routes.list_routes(), &loaded.granted, &self.options);
        Ok(guard_route(target, &loaded.granted, &menus))
    }

    fn ensure_loaded(&self) -> Result<Arc<LoadedPermissions>, PermissionError> {
        let mut slot = self.loaded.lock()?;
        if let Some(loaded) = slot.as_ref() {
            return Ok(Arc::clone(loaded));
        }

        let loaded = Arc::new(self.fetch());
        *slot = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    fn fetch(&self) -> LoadedPermissions {
        let granted = match self.source.fetch_permissions() {
            Ok(codes) => GrantedSet::new(codes),
            Err(err) => {
                error!(
                    event = "PermissionStore",
                    phase = "Fetch",
                    error = %err,
                    "failed to fetch granted permissions, nothing is granted"
                );
                GrantedSet::empty()
            }
        };

        let index = match self.source.fetch_all_permissions() {
            Ok(records) => PermissionIndex::new(records),
            Err(err) => {
                error!(
                    event = "PermissionStore",
                    phase = "Fetch",
                    error = %err,
                    "failed to fetch the permission list"
                );
                PermissionIndex::default()
            }
        };

        debug!(
            event = "PermissionStore",
            phase = "Loaded",
            granted = granted.len(),
            known = index.records().len()
        );
        LoadedPermissions { granted, index }
    }
}
