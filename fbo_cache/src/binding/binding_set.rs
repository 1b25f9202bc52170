/// Render-target binding set - the authoritative "currently bound" state.
///
/// Binds are cheap and local; `flush()` pushes the accumulated state to the
/// HAL only when something changed since the last push. Allocations are held
/// through `Weak` references, so binding never extends their lifetime.

use std::fmt;
use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use crate::allocation::Allocation;
use crate::error::{Error, Result};
use crate::hal::FramebufferHal;
use crate::{fbo_error, fbo_info, fbo_trace, fbo_warn};

const SOURCE: &str = "fbo::BindingSet";

/// Color slot count used when nothing else is configured
pub const DEFAULT_COLOR_TARGET_COUNT: u32 = 1;

static NEXT_BINDING_SET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a binding set
///
/// Backends key their driver-side framebuffer objects by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingSetId(u64);

impl BindingSetId {
    fn next() -> Self {
        Self(NEXT_BINDING_SET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BindingSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cache of the color and depth targets bound for rendering
///
/// Two states: dirty (bound state differs from what the HAL last received)
/// and clean. A new set starts dirty.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use fbo_cache::fbo::{RenderTargetBindingSet, FramebufferHal, Result};
/// use fbo_cache::fbo::allocation::Allocation;
///
/// fn draw(hal: &mut dyn FramebufferHal, color: &Arc<dyn Allocation>) -> Result<()> {
///     let mut set = RenderTargetBindingSet::new(1);
///     set.initialize_hardware(hal)?;
///     set.bind_color_target(Some(color), 0)?;
///     set.flush(hal)?;
///     set.teardown_hardware(hal)
/// }
/// ```
#[derive(Debug)]
pub struct RenderTargetBindingSet {
    id: BindingSetId,
    /// Fixed-length color slots
    color_targets: Vec<Option<Weak<dyn Allocation>>>,
    depth_target: Option<Weak<dyn Allocation>>,
    dirty: bool,
    /// `initialize_hardware()` succeeded and `teardown_hardware()` has not run
    hardware_initialized: bool,
}

impl RenderTargetBindingSet {
    /// Create a binding set with `color_capacity` empty color slots
    ///
    /// A capacity of 0 is raised to 1.
    pub fn new(color_capacity: u32) -> Self {
        let capacity = if color_capacity == 0 {
            fbo_warn!(SOURCE, "Color target capacity 0 requested, using 1");
            1
        } else {
            color_capacity
        };

        Self {
            id: BindingSetId::next(),
            color_targets: vec![None; capacity as usize],
            depth_target: None,
            dirty: true,
            hardware_initialized: false,
        }
    }

    pub fn id(&self) -> BindingSetId {
        self.id
    }

    /// Number of color slots (fixed at construction)
    pub fn color_capacity(&self) -> u32 {
        self.color_targets.len() as u32
    }

    /// True when the bound state has not been pushed to the HAL yet
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_hardware_initialized(&self) -> bool {
        self.hardware_initialized
    }

    // ===== QUERIES =====

    /// Allocation bound to a color slot
    ///
    /// Returns None for an empty slot, an out-of-range slot, or an allocation
    /// its owner has already released.
    pub fn color_target(&self, slot: u32) -> Option<Arc<dyn Allocation>> {
        self.color_targets.get(slot as usize)?.as_ref()?.upgrade()
    }

    /// All color slots in order, empty slots as None
    pub fn color_targets(&self) -> impl Iterator<Item = Option<Arc<dyn Allocation>>> + '_ {
        self.color_targets
            .iter()
            .map(|slot| slot.as_ref().and_then(Weak::upgrade))
    }

    pub fn depth_target(&self) -> Option<Arc<dyn Allocation>> {
        self.depth_target.as_ref()?.upgrade()
    }

    /// Number of color slots holding a live allocation
    pub fn bound_color_count(&self) -> usize {
        self.color_targets().filter(Option::is_some).count()
    }

    /// True when at least one color or depth target is bound and alive
    pub fn has_attachments(&self) -> bool {
        self.bound_color_count() > 0 || self.depth_target().is_some()
    }

    /// True when a slot was bound but its allocation has been released since
    pub fn has_released_targets(&self) -> bool {
        let released = |slot: &Option<Weak<dyn Allocation>>| {
            slot.as_ref().is_some_and(|weak| weak.strong_count() == 0)
        };
        self.color_targets.iter().any(released) || released(&self.depth_target)
    }

    // ===== BINDING =====

    /// Bind (or with None, unbind) a color target
    ///
    /// # Errors
    ///
    /// `Error::InvalidBinding` if `slot` is out of range or the allocation is
    /// not usable as a color target. The rejection is logged and the set is
    /// left untouched; nothing panics.
    pub fn bind_color_target(
        &mut self,
        allocation: Option<&Arc<dyn Allocation>>,
        slot: u32,
    ) -> Result<()> {
        if slot >= self.color_capacity() {
            return Err(self.reject(format!(
                "Invalid render target index {} (color capacity is {})",
                slot,
                self.color_capacity()
            )));
        }
        if let Some(a) = allocation {
            if !a.is_usable_as_color_target() {
                return Err(self.reject(format!(
                    "Invalid color target '{}' for slot {}: allocation is not usable as a texture",
                    a.name(),
                    slot
                )));
            }
        }

        self.color_targets[slot as usize] = allocation.map(Arc::downgrade);
        self.dirty = true;
        fbo_trace!(SOURCE, "Binding set {}: color slot {} = {}",
            self.id, slot, allocation.map_or("<none>", |a| a.name()));
        Ok(())
    }

    /// Bind (or with None, unbind) the depth target
    ///
    /// # Errors
    ///
    /// `Error::InvalidBinding` if the allocation is not usable as a render
    /// target. Same fail-soft policy as `bind_color_target`.
    pub fn bind_depth_target(&mut self, allocation: Option<&Arc<dyn Allocation>>) -> Result<()> {
        if let Some(a) = allocation {
            if !a.is_usable_as_render_target() {
                return Err(self.reject(format!(
                    "Invalid depth target '{}': allocation is not usable as a render target",
                    a.name()
                )));
            }
        }

        self.depth_target = allocation.map(Arc::downgrade);
        self.dirty = true;
        fbo_trace!(SOURCE, "Binding set {}: depth = {}",
            self.id, allocation.map_or("<none>", |a| a.name()));
        Ok(())
    }

    /// Clear every color slot and the depth slot
    pub fn reset_all(&mut self) {
        for slot in self.color_targets.iter_mut() {
            *slot = None;
        }
        self.depth_target = None;
        self.dirty = true;
        fbo_trace!(SOURCE, "Binding set {}: all targets reset", self.id);
    }

    // ===== HARDWARE =====

    /// Create the driver-side framebuffer object through the HAL
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` if already initialized, or whatever the
    /// HAL returns.
    pub fn initialize_hardware(&mut self, hal: &mut dyn FramebufferHal) -> Result<()> {
        if self.hardware_initialized {
            let message = format!("Binding set {} is already initialized on the hardware", self.id);
            fbo_error!(SOURCE, "{}", message);
            return Err(Error::InitializationFailed(message));
        }

        hal.init(self)?;
        self.hardware_initialized = true;
        fbo_info!(SOURCE, "Binding set {} initialized on backend '{}'", self.id, hal.name());
        Ok(())
    }

    /// Destroy the driver-side framebuffer object through the HAL
    ///
    /// Must run before the set is dropped. A set that was never initialized
    /// is left alone.
    pub fn teardown_hardware(&mut self, hal: &mut dyn FramebufferHal) -> Result<()> {
        if !self.hardware_initialized {
            fbo_trace!(SOURCE, "Binding set {}: teardown skipped, not initialized", self.id);
            return Ok(());
        }

        hal.destroy(self)?;
        self.hardware_initialized = false;
        fbo_info!(SOURCE, "Binding set {} destroyed on backend '{}'", self.id, hal.name());
        Ok(())
    }

    /// Push the bound state to the HAL if it changed since the last push
    ///
    /// Returns `Ok(true)` when the HAL was called, `Ok(false)` when the set
    /// was already clean.
    ///
    /// # Errors
    ///
    /// Propagates the HAL's error; the set then stays dirty so the next
    /// flush retries.
    pub fn flush(&mut self, hal: &mut dyn FramebufferHal) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }

        hal.set_active(self)?;
        self.dirty = false;
        fbo_trace!(SOURCE, "Binding set {} pushed to backend '{}'", self.id, hal.name());
        Ok(true)
    }

    /// Consume the set, reporting a leak if the hardware was never torn down
    ///
    /// # Errors
    ///
    /// `Error::ResourceLeak` when `teardown_hardware()` was not called. The
    /// driver object is abandoned; the set's references are still dropped.
    pub fn release(mut self) -> Result<()> {
        match self.abandon_hardware("released without teardown_hardware()") {
            Some(leak) => Err(leak),
            None => Ok(()),
        }
    }

    /// Forget the driver-side object without going through the HAL
    ///
    /// Logs and returns the leak when the set was still initialized. Drop
    /// then has nothing left to report.
    pub(crate) fn abandon_hardware(&mut self, reason: &str) -> Option<Error> {
        if !self.hardware_initialized {
            return None;
        }
        let message = format!("Binding set {} {}", self.id, reason);
        fbo_error!(SOURCE, "{}", message);
        self.hardware_initialized = false;
        Some(Error::ResourceLeak(message))
    }

    /// Log a rejected bind request and build its error
    fn reject(&self, message: String) -> Error {
        fbo_error!(SOURCE, "Binding set {}: {}", self.id, message);
        Error::InvalidBinding(message)
    }
}

impl Drop for RenderTargetBindingSet {
    fn drop(&mut self) {
        if !self.hardware_initialized {
            return;
        }

        let error = Error::ResourceLeak(format!(
            "Binding set {} dropped without teardown_hardware()", self.id
        ));
        fbo_error!(SOURCE, "{}", error);

        // Fatal in debug builds; release builds only drop the references
        if cfg!(debug_assertions) && !std::thread::panicking() {
            panic!("{}", error);
        }
    }
}

#[cfg(test)]
#[path = "binding_set_tests.rs"]
mod tests;
