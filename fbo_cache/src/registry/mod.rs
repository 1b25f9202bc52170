//! Backend registry module
//!
//! Maps backend names to HAL factories. The registry is an ordinary value
//! built by whatever composes the backends at startup; there is no global one.

mod backend_registry;

pub use backend_registry::{BackendRegistry, HalFactory};
