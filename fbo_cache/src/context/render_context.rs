/// Render context - owner of a framebuffer HAL and its binding set.
///
/// The context is what a host keeps per rendering thread. Client code binds
/// targets through it and calls `setup_framebuffer()` before each draw.

use std::sync::Arc;
use crate::allocation::Allocation;
use crate::binding::RenderTargetBindingSet;
use crate::error::Result;
use crate::hal::FramebufferHal;
use crate::{fbo_error, fbo_info, fbo_warn};
use super::ContextConfig;

const SOURCE: &str = "fbo::RenderContext";

/// One HAL plus one binding set
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use fbo_cache::fbo::{RenderContext, ContextConfig, FramebufferHal, Result};
/// use fbo_cache::fbo::allocation::Allocation;
///
/// fn frame(hal: Box<dyn FramebufferHal>, color: &Arc<dyn Allocation>) -> Result<()> {
///     let mut context = RenderContext::new(hal, &ContextConfig::default())?;
///     context.bind_color_target(Some(color), 0)?;
///     context.setup_framebuffer()?;
///     // draw...
///     context.destroy()
/// }
/// ```
pub struct RenderContext {
    hal: Box<dyn FramebufferHal>,
    binding_set: RenderTargetBindingSet,
    config: ContextConfig,
}

impl RenderContext {
    /// Build the binding set and create its framebuffer object on the HAL
    ///
    /// # Errors
    ///
    /// Whatever the HAL's `init` returns.
    pub fn new(mut hal: Box<dyn FramebufferHal>, config: &ContextConfig) -> Result<Self> {
        let mut binding_set = RenderTargetBindingSet::new(config.color_target_count);
        binding_set.initialize_hardware(hal.as_mut())?;

        fbo_info!(SOURCE, "Context created on backend '{}' with {} color target(s)",
            hal.name(), binding_set.color_capacity());

        Ok(Self {
            hal,
            binding_set,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn backend_name(&self) -> &str {
        self.hal.name()
    }

    pub fn binding_set(&self) -> &RenderTargetBindingSet {
        &self.binding_set
    }

    pub fn hal(&self) -> &dyn FramebufferHal {
        self.hal.as_ref()
    }

    /// See `RenderTargetBindingSet::bind_color_target`
    pub fn bind_color_target(&mut self, allocation: Option<&Arc<dyn Allocation>>, slot: u32) -> Result<()> {
        self.binding_set.bind_color_target(allocation, slot)
    }

    /// See `RenderTargetBindingSet::bind_depth_target`
    pub fn bind_depth_target(&mut self, allocation: Option<&Arc<dyn Allocation>>) -> Result<()> {
        self.binding_set.bind_depth_target(allocation)
    }

    /// Unbind every render target
    pub fn reset_render_targets(&mut self) {
        self.binding_set.reset_all();
    }

    /// Push pending bindings to the HAL (no-op when nothing changed)
    ///
    /// Returns whether the HAL was called.
    pub fn setup_framebuffer(&mut self) -> Result<bool> {
        self.binding_set.flush(self.hal.as_mut())
    }

    /// Tear the framebuffer object down and consume the context
    ///
    /// # Errors
    ///
    /// Whatever the HAL's `destroy` returns. The framebuffer object is then
    /// abandoned and logged as leaked; the context is still consumed.
    pub fn destroy(mut self) -> Result<()> {
        if let Err(e) = self.binding_set.teardown_hardware(self.hal.as_mut()) {
            self.binding_set.abandon_hardware("abandoned after a failed teardown");
            return Err(e);
        }
        fbo_info!(SOURCE, "Context on backend '{}' destroyed", self.hal.name());
        Ok(())
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        if !self.binding_set.is_hardware_initialized() {
            return;
        }

        // Best-effort cleanup for contexts dropped without destroy()
        fbo_warn!(SOURCE, "Context dropped without destroy(), tearing down binding set {}",
            self.binding_set.id());
        if let Err(e) = self.binding_set.teardown_hardware(self.hal.as_mut()) {
            fbo_error!(SOURCE, "Teardown during drop failed: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "render_context_tests.rs"]
mod tests;
