/// Hardware abstraction module - framebuffer dispatch trait

pub mod framebuffer_hal;

pub use framebuffer_hal::*;

// Mock HAL for tests (no GPU required)
#[cfg(test)]
pub mod mock_hal;
