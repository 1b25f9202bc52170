/// FramebufferHal trait - the hardware side of a render-target binding set
///
/// The binding set never touches a driver itself. It hands itself to these
/// three entry points and the backend reads the bound state back through the
/// binding set's query methods.

use crate::binding::RenderTargetBindingSet;
use crate::error::Result;

/// Framebuffer dispatch table
///
/// Implemented by backends (e.g., `SoftwareHal`). A backend keys any driver
/// object it creates by `RenderTargetBindingSet::id()`.
pub trait FramebufferHal: Send {
    /// Backend name, as registered in the `BackendRegistry`
    fn name(&self) -> &str;

    /// Create the driver-side framebuffer object for a binding set
    fn init(&mut self, binding_set: &RenderTargetBindingSet) -> Result<()>;

    /// Destroy the driver-side framebuffer object of a binding set
    fn destroy(&mut self, binding_set: &RenderTargetBindingSet) -> Result<()>;

    /// Attach the binding set's current color/depth targets and make it active
    ///
    /// Called by `RenderTargetBindingSet::flush()` only when the set is dirty.
    fn set_active(&mut self, binding_set: &RenderTargetBindingSet) -> Result<()>;
}
