/// Mock HAL for unit tests (no GPU required)
///
/// Records every dispatch and a snapshot of the binding state passed to
/// `set_active`, so tests can check exactly what reached "hardware".

use std::sync::{Arc, Mutex};
use crate::allocation::{Allocation, AllocationInfo, AllocationUsage, TextureFormat};
use crate::binding::{BindingSetId, RenderTargetBindingSet};
use crate::error::{Error, Result};
use crate::hal::FramebufferHal;

// ============================================================================
// Mock Allocation
// ============================================================================

#[derive(Debug)]
pub struct MockAllocation {
    pub info: AllocationInfo,
    pub name: String,
}

impl MockAllocation {
    pub fn new(name: &str, usage: AllocationUsage) -> Self {
        Self {
            info: AllocationInfo {
                width: 256,
                height: 256,
                format: TextureFormat::R8G8B8A8_UNORM,
                usage,
            },
            name: name.to_string(),
        }
    }

    /// Shared color-capable allocation
    pub fn color(name: &str) -> Arc<dyn Allocation> {
        Arc::new(Self::new(name, AllocationUsage::TEXTURE | AllocationUsage::RENDER_TARGET))
    }

    /// Shared render-target-only allocation (valid depth, invalid color)
    pub fn depth(name: &str) -> Arc<dyn Allocation> {
        Arc::new(Self::new(name, AllocationUsage::RENDER_TARGET))
    }

    /// Shared allocation with no render capability at all
    pub fn script(name: &str) -> Arc<dyn Allocation> {
        Arc::new(Self::new(name, AllocationUsage::SCRIPT))
    }
}

impl Allocation for MockAllocation {
    fn info(&self) -> &AllocationInfo {
        &self.info
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Mock HAL
// ============================================================================

/// Binding state as seen by the HAL at `set_active` time (allocation names)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatedState {
    pub binding_set: BindingSetId,
    pub color: Vec<Option<String>>,
    pub depth: Option<String>,
}

#[derive(Debug, Default)]
pub struct MockHalLog {
    pub calls: Vec<String>,
    pub activations: Vec<ActivatedState>,
}

/// Mock HAL; the log is shared so tests can inspect it after handing the HAL off
pub struct MockHal {
    pub log: Arc<Mutex<MockHalLog>>,
    pub fail_set_active: bool,
    pub fail_init: bool,
    pub fail_destroy: bool,
}

impl MockHal {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(MockHalLog::default())),
            fail_set_active: false,
            fail_init: false,
            fail_destroy: false,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().calls.clone()
    }

    pub fn activations(&self) -> Vec<ActivatedState> {
        self.log.lock().unwrap().activations.clone()
    }
}

impl FramebufferHal for MockHal {
    fn name(&self) -> &str {
        "mock"
    }

    fn init(&mut self, _binding_set: &RenderTargetBindingSet) -> Result<()> {
        self.log.lock().unwrap().calls.push("init".to_string());
        if self.fail_init {
            return Err(Error::BackendError("mock init failure".to_string()));
        }
        Ok(())
    }

    fn destroy(&mut self, _binding_set: &RenderTargetBindingSet) -> Result<()> {
        self.log.lock().unwrap().calls.push("destroy".to_string());
        if self.fail_destroy {
            return Err(Error::BackendError("mock destroy failure".to_string()));
        }
        Ok(())
    }

    fn set_active(&mut self, binding_set: &RenderTargetBindingSet) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        log.calls.push("set_active".to_string());
        if self.fail_set_active {
            return Err(Error::BackendError("mock set_active failure".to_string()));
        }
        let color = binding_set
            .color_targets()
            .map(|target| target.map(|a| a.name().to_string()))
            .collect();
        let depth = binding_set.depth_target().map(|a| a.name().to_string());
        log.activations.push(ActivatedState {
            binding_set: binding_set.id(),
            color,
            depth,
        });
        Ok(())
    }
}
