use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::builder::{BuiltPermissions, build_permissions};
use crate::config::PermissionConfig;
use crate::error::PermissionError;
use crate::loader;
use crate::types::{BuiltPermission, PermissionNode};
use crate::validate::{ValidationReport, validate_config};

struct RegistryState {
    config: PermissionConfig,
    built: Option<Arc<BuiltPermissions>>,
}

/// The application's permission configuration and its memoized build.
/// Cloneable and thread-safe; clones share state.
#[derive(Clone)]
pub struct PermissionRegistry {
    inner: Arc<RwLock<RegistryState>>,
}

impl PermissionRegistry {
    pub fn new(config: PermissionConfig) -> Self {
        PermissionRegistry {
            inner: Arc::new(RwLock::new(RegistryState {
                config,
                built: None,
            })),
        }
    }

    pub fn new_from_str(config_text: &str) -> Result<Self, PermissionError> {
        let config = loader::load_config(config_text)?;
        Ok(PermissionRegistry::new(config))
    }

    /// Build the configuration, or return the memoized build.
    pub fn build(&self) -> Result<Arc<BuiltPermissions>, PermissionError> {
        if let Some(built) = &self.inner.read()?.built {
            debug!(event = "Registry", phase = "Build", cached = true);
            return Ok(Arc::clone(built));
        }

        let mut state = self.inner.write()?;
        // Another writer may have built while we waited.
        if let Some(built) = &state.built {
            return Ok(Arc::clone(built));
        }
        let built = Arc::new(build_permissions(&state.config));
        state.built = Some(Arc::clone(&built));
        info!(
            event = "Registry",
            phase = "Build",
            cached = false,
            count = built.len()
        );
        Ok(built)
    }

    pub fn is_built(&self) -> Result<bool, PermissionError> {
        Ok(self.inner.read()?.built.is_some())
    }

    /// Forget the memoized build; the next access rebuilds.
    pub fn invalidate(&self) -> Result<(), PermissionError> {
        self.inner.write()?.built = None;
        debug!(event = "Registry", phase = "Invalidate");
        Ok(())
    }

    /// Swap in a new configuration. Builds handed out earlier stay valid.
    pub fn reload(&self, config: PermissionConfig) -> Result<(), PermissionError> {
        let mut state = self.inner.write()?;
        state.config = config;
        state.built = None;
        info!(event = "Registry", phase = "Reload", roots = state.config.len());
        Ok(())
    }

    /// Parse and swap in a new configuration. On a parse error the current
    /// configuration is kept.
    pub fn reload_from_str(&self, config_text: &str) -> Result<(), PermissionError> {
        let config = loader::load_config(config_text)?;
        self.reload(config)
    }

    pub fn config(&self) -> Result<PermissionConfig, PermissionError> {
        Ok(self.inner.read()?.config.clone())
    }

    pub fn permission_by_code(
        &self,
        code: &str,
    ) -> Result<Option<BuiltPermission>, PermissionError> {
        Ok(self.build()?.get(code).cloned())
    }

    pub fn code_for_path<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Option<String>, PermissionError> {
        Ok(self.build()?.code_for_path(names).map(str::to_string))
    }

    pub fn tree(&self) -> Result<Vec<PermissionNode>, PermissionError> {
        Ok(self.build()?.tree())
    }

    pub fn validate(&self) -> Result<ValidationReport, PermissionError> {
        let state = self.inner.read()?;
        Ok(validate_config(&state.config))
    }
}

#[cfg(test)]
mod tests;
