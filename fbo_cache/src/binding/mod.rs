//! Render-target binding module
//!
//! Provides the cache of currently bound color/depth targets and the lazy
//! push of that state to the hardware abstraction layer.

mod binding_set;

pub use binding_set::{BindingSetId, RenderTargetBindingSet, DEFAULT_COLOR_TARGET_COUNT};
