/// Framebuffer objects of the software backend
///
/// A framebuffer object exists per binding set between `init` and `destroy`.
/// Each successful `set_active` stores a snapshot of what was attached.

use glam::UVec2;
use fbo_cache::fbo::BindingSetId;
use fbo_cache::fbo::allocation::{Allocation, TextureFormat};

/// One resolved attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentInfo {
    pub name: String,
    pub format: TextureFormat,
    pub extent: UVec2,
}

impl AttachmentInfo {
    pub(crate) fn from_allocation(allocation: &dyn Allocation) -> Self {
        let info = allocation.info();
        Self {
            name: allocation.name().to_string(),
            format: info.format,
            extent: UVec2::new(info.width, info.height),
        }
    }

    /// Bytes covered by this attachment, `None` on overflow
    pub fn byte_size(&self) -> Option<u64> {
        (self.extent.x as u64)
            .checked_mul(self.extent.y as u64)?
            .checked_mul(self.format.bytes_per_pixel() as u64)
    }
}

/// Attachments of a framebuffer object, in color-slot order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramebufferAttachments {
    pub color: Vec<Option<AttachmentInfo>>,
    pub depth: Option<AttachmentInfo>,
    /// Common extent of all attachments
    pub extent: UVec2,
}

impl FramebufferAttachments {
    pub fn color_attachment_count(&self) -> usize {
        self.color.iter().filter(|c| c.is_some()).count()
    }

    /// Total bytes covered by all attachments, `None` on overflow
    pub fn byte_size(&self) -> Option<u64> {
        self.color
            .iter()
            .flatten()
            .chain(self.depth.iter())
            .try_fold(0u64, |total, attachment| total.checked_add(attachment.byte_size()?))
    }
}

/// What rendering currently targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFramebuffer {
    /// The window's framebuffer (no targets bound)
    Default { extent: UVec2 },
    /// A binding set's framebuffer object
    Object {
        binding_set: BindingSetId,
        attachments: FramebufferAttachments,
    },
}

impl ActiveFramebuffer {
    pub fn extent(&self) -> UVec2 {
        match self {
            ActiveFramebuffer::Default { extent } => *extent,
            ActiveFramebuffer::Object { attachments, .. } => attachments.extent,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ActiveFramebuffer::Default { .. })
    }
}

/// Driver-side framebuffer object
#[derive(Debug)]
pub(crate) struct SoftwareFramebuffer {
    pub(crate) binding_set: BindingSetId,
    /// Last attachments pushed by `set_active`
    pub(crate) attachments: Option<FramebufferAttachments>,
    pub(crate) activation_count: u64,
}

impl SoftwareFramebuffer {
    pub(crate) fn new(binding_set: BindingSetId) -> Self {
        Self {
            binding_set,
            attachments: None,
            activation_count: 0,
        }
    }
}

#[cfg(test)]
#[path = "software_framebuffer_tests.rs"]
mod tests;
