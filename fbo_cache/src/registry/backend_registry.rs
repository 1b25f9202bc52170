/// Backend registry - name → framebuffer HAL factory.
///
/// Backend crates expose a `register(&mut BackendRegistry)` function; the
/// host calls each one at startup and later creates contexts by name.

use rustc_hash::FxHashMap;
use crate::context::{ContextConfig, RenderContext};
use crate::error::{Error, Result};
use crate::hal::FramebufferHal;
use crate::{fbo_error, fbo_info};

const SOURCE: &str = "fbo::BackendRegistry";

/// Factory function creating a HAL for a given configuration
pub type HalFactory = Box<dyn Fn(&ContextConfig) -> Result<Box<dyn FramebufferHal>> + Send + Sync>;

/// Registry of framebuffer backends
///
/// # Example
///
/// ```no_run
/// use fbo_cache::fbo::{BackendRegistry, ContextConfig};
///
/// let mut registry = BackendRegistry::new();
/// // fbo_cache_backend_software::register(&mut registry)?;
/// let context = registry.create_context(&ContextConfig::default())?;
/// context.destroy()?;
/// # Ok::<(), fbo_cache::fbo::Error>(())
/// ```
pub struct BackendRegistry {
    backends: FxHashMap<String, HalFactory>,
}

impl BackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            backends: FxHashMap::default(),
        }
    }

    /// Register a backend factory under `name`
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` if `name` is already registered.
    pub fn register_backend<F>(&mut self, name: &str, factory: F) -> Result<()>
    where
        F: Fn(&ContextConfig) -> Result<Box<dyn FramebufferHal>> + Send + Sync + 'static,
    {
        if self.backends.contains_key(name) {
            let message = format!("Backend '{}' is already registered", name);
            fbo_error!(SOURCE, "{}", message);
            return Err(Error::InitializationFailed(message));
        }

        self.backends.insert(name.to_string(), Box::new(factory));
        fbo_info!(SOURCE, "Registered backend '{}'", name);
        Ok(())
    }

    /// Remove a backend; returns false if it was not registered
    pub fn unregister_backend(&mut self, name: &str) -> bool {
        self.backends.remove(name).is_some()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// Registered backend names, sorted
    pub fn backend_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// Create a HAL from the backend registered under `name`
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` for an unknown name, or whatever the
    /// factory returns.
    pub fn create_hal(&self, name: &str, config: &ContextConfig) -> Result<Box<dyn FramebufferHal>> {
        let factory = self.backends.get(name).ok_or_else(|| {
            let message = format!("Backend '{}' not found (registered: {:?})", name, self.backend_names());
            fbo_error!(SOURCE, "{}", message);
            Error::InitializationFailed(message)
        })?;
        factory(config)
    }

    /// Create a context on the backend named by `config.backend`
    pub fn create_context(&self, config: &ContextConfig) -> Result<RenderContext> {
        let hal = self.create_hal(&config.backend, config)?;
        RenderContext::new(hal, config)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "backend_registry_tests.rs"]
mod tests;
