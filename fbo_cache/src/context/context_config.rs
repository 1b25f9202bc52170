/// Context configuration

use crate::binding::DEFAULT_COLOR_TARGET_COUNT;

/// Configuration for a `RenderContext`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// Number of color target slots in the context's binding set
    pub color_target_count: u32,
    /// Backend name looked up in the `BackendRegistry`
    pub backend: String,
    /// Run framebuffer completeness checks in the backend on every push
    pub enable_validation: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            color_target_count: DEFAULT_COLOR_TARGET_COUNT,
            backend: "software".to_string(),
            enable_validation: cfg!(debug_assertions),
        }
    }
}

impl ContextConfig {
    /// Same configuration with a different color slot count
    pub fn with_color_targets(mut self, count: u32) -> Self {
        self.color_target_count = count;
        self
    }

    /// Same configuration targeting another backend
    pub fn with_backend(mut self, backend: &str) -> Self {
        self.backend = backend.to_string();
        self
    }

    /// Same configuration with validation toggled
    pub fn with_validation(mut self, enable: bool) -> Self {
        self.enable_validation = enable;
        self
    }
}
