/// Tests for allocation capability queries and formats

use super::*;

struct PlainAllocation {
    info: AllocationInfo,
}

impl Allocation for PlainAllocation {
    fn info(&self) -> &AllocationInfo {
        &self.info
    }

    fn name(&self) -> &str {
        "plain"
    }
}

fn with_usage(usage: AllocationUsage) -> PlainAllocation {
    PlainAllocation {
        info: AllocationInfo {
            width: 64,
            height: 64,
            format: TextureFormat::R8G8B8A8_UNORM,
            usage,
        },
    }
}

#[test]
fn test_color_capability_requires_texture_usage() {
    assert!(with_usage(AllocationUsage::TEXTURE).is_usable_as_color_target());
    assert!(!with_usage(AllocationUsage::RENDER_TARGET).is_usable_as_color_target());
    assert!(!with_usage(AllocationUsage::SCRIPT | AllocationUsage::VERTEX).is_usable_as_color_target());
}

#[test]
fn test_render_target_capability_requires_render_target_usage() {
    assert!(with_usage(AllocationUsage::RENDER_TARGET).is_usable_as_render_target());
    assert!(!with_usage(AllocationUsage::TEXTURE).is_usable_as_render_target());
    assert!(!with_usage(AllocationUsage::empty()).is_usable_as_render_target());
}

#[test]
fn test_combined_usage_satisfies_both() {
    let a = with_usage(AllocationUsage::TEXTURE | AllocationUsage::RENDER_TARGET);
    assert!(a.is_usable_as_color_target());
    assert!(a.is_usable_as_render_target());
}

#[test]
fn test_desc_helpers() {
    let color = AllocationDesc::color("albedo", 320, 240, TextureFormat::R8G8B8A8_UNORM);
    assert!(color.usage.contains(AllocationUsage::TEXTURE));
    assert!(color.usage.contains(AllocationUsage::RENDER_TARGET));

    let depth = AllocationDesc::depth("depth", 320, 240, TextureFormat::D24_UNORM_S8_UINT);
    assert_eq!(depth.usage, AllocationUsage::RENDER_TARGET);

    let info = depth.info();
    assert_eq!(info.width, 320);
    assert_eq!(info.height, 240);
    assert_eq!(info.format, TextureFormat::D24_UNORM_S8_UINT);
}

#[test]
fn test_depth_formats() {
    assert!(TextureFormat::D16_UNORM.is_depth());
    assert!(TextureFormat::D24_UNORM_S8_UINT.is_depth());
    assert!(TextureFormat::D32_FLOAT.is_depth());
    assert!(!TextureFormat::R8G8B8A8_UNORM.is_depth());
    assert!(!TextureFormat::R5G6B5_UNORM.is_depth());
}

#[test]
fn test_bytes_per_pixel() {
    assert_eq!(TextureFormat::A8_UNORM.bytes_per_pixel(), 1);
    assert_eq!(TextureFormat::R5G6B5_UNORM.bytes_per_pixel(), 2);
    assert_eq!(TextureFormat::B8G8R8A8_UNORM.bytes_per_pixel(), 4);
    assert_eq!(TextureFormat::R16G16B16A16_SFLOAT.bytes_per_pixel(), 8);
}
