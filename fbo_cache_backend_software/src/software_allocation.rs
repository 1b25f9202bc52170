/// SoftwareAllocation - descriptor-only implementation of the Allocation trait

use std::sync::Arc;
use fbo_cache::fbo::{Error, Result};
use fbo_cache::fbo::allocation::{Allocation, AllocationDesc, AllocationInfo};
use fbo_cache::fbo_error;

/// Allocation described by its descriptor; the storage size is tracked, not
/// reserved
#[derive(Debug)]
pub struct SoftwareAllocation {
    info: AllocationInfo,
    name: String,
    byte_size: u64,
}

impl SoftwareAllocation {
    /// Create an allocation from a descriptor
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if the width or height is 0, or if the
    /// storage size does not fit in 64 bits.
    pub fn new(desc: AllocationDesc) -> Result<Self> {
        if desc.width == 0 || desc.height == 0 {
            let message = format!(
                "Allocation '{}' has an empty extent {}x{}", desc.name, desc.width, desc.height
            );
            fbo_error!("fbo::software", "{}", message);
            return Err(Error::InvalidResource(message));
        }

        let byte_size = (desc.width as u64)
            .checked_mul(desc.height as u64)
            .and_then(|texels| texels.checked_mul(desc.format.bytes_per_pixel() as u64));
        let Some(byte_size) = byte_size else {
            let message = format!(
                "Allocation '{}' of {}x{} {:?} overflows its storage size",
                desc.name, desc.width, desc.height, desc.format
            );
            fbo_error!("fbo::software", "{}", message);
            return Err(Error::InvalidResource(message));
        };

        Ok(Self {
            info: desc.info(),
            name: desc.name,
            byte_size,
        })
    }

    /// Create an allocation already wrapped for binding
    pub fn shared(desc: AllocationDesc) -> Result<Arc<dyn Allocation>> {
        Ok(Arc::new(Self::new(desc)?))
    }

    /// Size of the storage in bytes
    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }
}

impl Allocation for SoftwareAllocation {
    fn info(&self) -> &AllocationInfo {
        &self.info
    }

    fn name(&self) -> &str {
        &self.name
    }
}
