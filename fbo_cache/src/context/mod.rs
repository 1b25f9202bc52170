//! Render context module
//!
//! Composes one framebuffer HAL with one binding set and drives the
//! hardware lifecycle (init on creation, teardown on destroy/drop).

mod context_config;
mod render_context;

pub use context_config::ContextConfig;
pub use render_context::RenderContext;
