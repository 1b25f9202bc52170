/// Allocation capability object, usage flags and pixel formats
///
/// An allocation is a host-owned GPU buffer. The binding cache only ever asks
/// it two questions (can it be a color target, can it be a render target) and
/// holds it through a `Weak` reference.

use bitflags::bitflags;

/// Pixel format of an allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    // Color formats
    R8G8B8A8_UNORM,
    R8G8B8A8_SRGB,
    B8G8R8A8_UNORM,
    R5G6B5_UNORM,
    A8_UNORM,
    R16G16B16A16_SFLOAT,

    // Depth formats
    D16_UNORM,
    D24_UNORM_S8_UINT,
    D32_FLOAT,
}

impl TextureFormat {
    /// Returns true for depth (and depth/stencil) formats
    pub fn is_depth(&self) -> bool {
        matches!(
            self,
            TextureFormat::D16_UNORM | TextureFormat::D24_UNORM_S8_UINT | TextureFormat::D32_FLOAT
        )
    }

    /// Size of one texel in bytes
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::A8_UNORM => 1,
            TextureFormat::R5G6B5_UNORM | TextureFormat::D16_UNORM => 2,
            TextureFormat::R8G8B8A8_UNORM
            | TextureFormat::R8G8B8A8_SRGB
            | TextureFormat::B8G8R8A8_UNORM
            | TextureFormat::D24_UNORM_S8_UINT
            | TextureFormat::D32_FLOAT => 4,
            TextureFormat::R16G16B16A16_SFLOAT => 8,
        }
    }
}

bitflags! {
    /// How an allocation may be used by the runtime
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AllocationUsage: u32 {
        /// Accessible from compute scripts
        const SCRIPT = 1 << 0;
        /// Sampled as a texture; required to be bound as a color target
        const TEXTURE = 1 << 1;
        /// Vertex data
        const VERTEX = 1 << 2;
        /// Shader constants
        const CONSTANTS = 1 << 3;
        /// Renderable; required to be bound as the depth target
        const RENDER_TARGET = 1 << 4;
    }
}

/// Read-only properties of an allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: AllocationUsage,
}

/// Descriptor for creating an allocation through a backend
#[derive(Debug, Clone)]
pub struct AllocationDesc {
    /// Debug name
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: AllocationUsage,
}

impl AllocationDesc {
    /// Descriptor for a sampled, renderable color buffer
    pub fn color(name: &str, width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            format,
            usage: AllocationUsage::TEXTURE | AllocationUsage::RENDER_TARGET,
        }
    }

    /// Descriptor for a renderable depth buffer
    pub fn depth(name: &str, width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            format,
            usage: AllocationUsage::RENDER_TARGET,
        }
    }

    pub fn info(&self) -> AllocationInfo {
        AllocationInfo {
            width: self.width,
            height: self.height,
            format: self.format,
            usage: self.usage,
        }
    }
}

/// Allocation capability trait
///
/// Implemented by the host's (or a backend's) buffer type. The binding cache
/// checks the capability queries at bind time only.
pub trait Allocation: Send + Sync {
    /// Read-only properties of this allocation
    fn info(&self) -> &AllocationInfo;

    /// Debug name
    fn name(&self) -> &str;

    /// Whether this allocation may be bound to a color slot
    fn is_usable_as_color_target(&self) -> bool {
        self.info().usage.contains(AllocationUsage::TEXTURE)
    }

    /// Whether this allocation may be bound as the depth target
    fn is_usable_as_render_target(&self) -> bool {
        self.info().usage.contains(AllocationUsage::RENDER_TARGET)
    }
}

#[cfg(test)]
#[path = "allocation_tests.rs"]
mod tests;
