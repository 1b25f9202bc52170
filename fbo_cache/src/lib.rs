/*!
# fbo_cache

Render-target binding cache for a rendering runtime.

The cache tracks which allocations are bound as color and depth targets and
pushes that state to a hardware abstraction layer lazily: binds are cheap and
local, and the HAL is only called when something changed since the last push.
Backends (software reference, GPU drivers) implement the HAL trait in their own
crates and register with an explicit backend registry.

## Architecture

- **RenderTargetBindingSet**: Color slots, depth slot and dirty flag
- **FramebufferHal**: Backend dispatch trait (init / destroy / set_active)
- **Allocation**: Capability trait for bindable buffers
- **RenderContext**: One HAL plus one binding set, with lifecycle handling
- **BackendRegistry**: Name → HAL factory, populated at startup
*/

// Internal modules
mod error;
mod logging;
pub mod log;
pub mod allocation;
pub mod hal;
pub mod binding;
pub mod context;
pub mod registry;

#[cfg(test)]
mod test_support;

// Main fbo namespace module
pub mod fbo {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::logging::Logging;

    // Core types
    pub use crate::binding::{BindingSetId, RenderTargetBindingSet, DEFAULT_COLOR_TARGET_COUNT};
    pub use crate::hal::FramebufferHal;
    pub use crate::context::{ContextConfig, RenderContext};
    pub use crate::registry::{BackendRegistry, HalFactory};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Allocation sub-module
    pub mod allocation {
        pub use crate::allocation::*;
    }
}
