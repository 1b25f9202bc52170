/*!
# fbo_cache - Software Backend

Reference implementation of the `FramebufferHal` trait.

Framebuffer objects live in host memory: `init` creates one per binding set,
`set_active` resolves the bound allocations, checks completeness and records
the result as the active framebuffer. No GPU is required, which makes this the
backend used by tests and tools.

The backend is registered under the name `"software"`.
*/

mod software_allocation;
mod software_framebuffer;
mod software_hal;

use fbo_cache::fbo::{BackendRegistry, ContextConfig, FramebufferHal, Result};

pub use software_allocation::SoftwareAllocation;
pub use software_framebuffer::{ActiveFramebuffer, AttachmentInfo, FramebufferAttachments};
pub use software_hal::{SoftwareDevice, SoftwareHal, DEFAULT_WINDOW_EXTENT};

/// Name the backend registers under
pub const BACKEND_NAME: &str = "software";

pub mod software {
    pub use crate::software_allocation::SoftwareAllocation;
    pub use crate::software_framebuffer::{ActiveFramebuffer, AttachmentInfo, FramebufferAttachments};
    pub use crate::software_hal::{SoftwareDevice, SoftwareHal, DEFAULT_WINDOW_EXTENT};
    pub use crate::{register, BACKEND_NAME};
}

/// Register the software backend with a backend registry
///
/// # Example
///
/// ```no_run
/// use fbo_cache::fbo::{BackendRegistry, ContextConfig};
///
/// let mut registry = BackendRegistry::new();
/// fbo_cache_backend_software::register(&mut registry)?;
/// let context = registry.create_context(&ContextConfig::default())?;
/// context.destroy()?;
/// # Ok::<(), fbo_cache::fbo::Error>(())
/// ```
pub fn register(registry: &mut BackendRegistry) -> Result<()> {
    registry.register_backend(BACKEND_NAME, |config: &ContextConfig| {
        Ok(Box::new(SoftwareHal::new(config)) as Box<dyn FramebufferHal>)
    })
}
