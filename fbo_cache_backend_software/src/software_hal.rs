/// SoftwareHal - FramebufferHal implementation over host memory
///
/// Completeness rules applied by `set_active` when validation is enabled:
/// color attachments use color formats, the depth attachment uses a depth
/// format, and every attachment has the same extent. A bound allocation that
/// was released is rejected whether or not validation is enabled.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use glam::UVec2;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use fbo_cache::fbo::{BindingSetId, ContextConfig, FramebufferHal, RenderTargetBindingSet, Result};
use fbo_cache::{fbo_bail, fbo_debug, fbo_err, fbo_warn};
use crate::software_framebuffer::{
    ActiveFramebuffer, AttachmentInfo, FramebufferAttachments, SoftwareFramebuffer,
};
use crate::BACKEND_NAME;

const SOURCE: &str = "fbo::software";

/// Extent of the default (window) framebuffer unless configured otherwise
pub const DEFAULT_WINDOW_EXTENT: UVec2 = UVec2::new(800, 600);

new_key_type! {
    /// Stable key of a framebuffer object
    struct FramebufferKey;
}

#[derive(Default)]
struct DeviceState {
    framebuffers: SlotMap<FramebufferKey, SoftwareFramebuffer>,
    by_binding_set: FxHashMap<BindingSetId, FramebufferKey>,
    active: Option<ActiveFramebuffer>,
    activation_count: u64,
}

/// Shared view of the software device, for inspecting it after the HAL has
/// been handed to a `RenderContext`
#[derive(Clone, Default)]
pub struct SoftwareDevice {
    state: Arc<Mutex<DeviceState>>,
}

impl SoftwareDevice {
    fn lock(&self) -> MutexGuard<'_, DeviceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of live framebuffer objects
    pub fn framebuffer_count(&self) -> usize {
        self.lock().framebuffers.len()
    }

    /// Whether a binding set currently owns a framebuffer object
    pub fn has_framebuffer(&self, binding_set: BindingSetId) -> bool {
        self.lock().by_binding_set.contains_key(&binding_set)
    }

    /// Total successful `set_active` calls
    pub fn activation_count(&self) -> u64 {
        self.lock().activation_count
    }

    /// Successful `set_active` calls that targeted a binding set's own object
    pub fn framebuffer_activation_count(&self, binding_set: BindingSetId) -> u64 {
        let state = self.lock();
        state
            .by_binding_set
            .get(&binding_set)
            .and_then(|key| state.framebuffers.get(*key))
            .map_or(0, |fb| fb.activation_count)
    }

    /// Attachments last pushed for a binding set
    pub fn attachments(&self, binding_set: BindingSetId) -> Option<FramebufferAttachments> {
        let state = self.lock();
        let key = state.by_binding_set.get(&binding_set)?;
        state.framebuffers.get(*key)?.attachments.clone()
    }

    /// What rendering currently targets (None before the first activation)
    pub fn active_framebuffer(&self) -> Option<ActiveFramebuffer> {
        self.lock().active.clone()
    }
}

/// Software framebuffer HAL
pub struct SoftwareHal {
    device: SoftwareDevice,
    validate: bool,
    window_extent: UVec2,
}

impl SoftwareHal {
    /// Create a HAL; completeness checks follow `config.enable_validation`
    pub fn new(config: &ContextConfig) -> Self {
        Self {
            device: SoftwareDevice::default(),
            validate: config.enable_validation,
            window_extent: DEFAULT_WINDOW_EXTENT,
        }
    }

    /// Use another extent for the default framebuffer
    pub fn with_window_extent(mut self, extent: UVec2) -> Self {
        self.window_extent = extent;
        self
    }

    /// Introspection handle sharing this HAL's state
    pub fn device(&self) -> SoftwareDevice {
        self.device.clone()
    }

    pub fn is_validating(&self) -> bool {
        self.validate
    }

    /// Resolve the binding set's weak references into attachment snapshots
    fn resolve_attachments(&self, binding_set: &RenderTargetBindingSet) -> Result<FramebufferAttachments> {
        if binding_set.has_released_targets() {
            fbo_bail!(SOURCE, "Binding set {}: a bound allocation was released before activation",
                binding_set.id());
        }

        let mut extent: Option<UVec2> = None;
        let mut check_extent = |attachment: &AttachmentInfo| -> Result<()> {
            match extent {
                None => extent = Some(attachment.extent),
                Some(expected) if self.validate && expected != attachment.extent => {
                    fbo_bail!(SOURCE,
                        "Framebuffer incomplete: attachment '{}' is {}x{}, expected {}x{}",
                        attachment.name, attachment.extent.x, attachment.extent.y,
                        expected.x, expected.y);
                }
                Some(_) => {}
            }
            Ok(())
        };

        let mut color = Vec::with_capacity(binding_set.color_capacity() as usize);
        for (slot, target) in binding_set.color_targets().enumerate() {
            let attachment = match target {
                Some(allocation) => {
                    let attachment = AttachmentInfo::from_allocation(allocation.as_ref());
                    if self.validate && attachment.format.is_depth() {
                        fbo_bail!(SOURCE,
                            "Framebuffer incomplete: color attachment {} '{}' has depth format {:?}",
                            slot, attachment.name, attachment.format);
                    }
                    check_extent(&attachment)?;
                    Some(attachment)
                }
                None => None,
            };
            color.push(attachment);
        }

        let depth = match binding_set.depth_target() {
            Some(allocation) => {
                let attachment = AttachmentInfo::from_allocation(allocation.as_ref());
                if self.validate && !attachment.format.is_depth() {
                    fbo_bail!(SOURCE,
                        "Framebuffer incomplete: depth attachment '{}' has color format {:?}",
                        attachment.name, attachment.format);
                }
                check_extent(&attachment)?;
                Some(attachment)
            }
            None => None,
        };

        Ok(FramebufferAttachments {
            color,
            depth,
            extent: extent.unwrap_or(self.window_extent),
        })
    }
}

impl FramebufferHal for SoftwareHal {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn init(&mut self, binding_set: &RenderTargetBindingSet) -> Result<()> {
        let mut state = self.device.lock();
        if state.by_binding_set.contains_key(&binding_set.id()) {
            fbo_bail!(SOURCE, "Binding set {} already has a framebuffer object", binding_set.id());
        }

        let key = state.framebuffers.insert(SoftwareFramebuffer::new(binding_set.id()));
        state.by_binding_set.insert(binding_set.id(), key);
        fbo_debug!(SOURCE, "Created framebuffer object for binding set {}", binding_set.id());
        Ok(())
    }

    fn destroy(&mut self, binding_set: &RenderTargetBindingSet) -> Result<()> {
        let mut state = self.device.lock();
        let key = state.by_binding_set.remove(&binding_set.id()).ok_or_else(|| {
            fbo_err!(SOURCE, "Binding set {} has no framebuffer object to destroy", binding_set.id())
        })?;
        state.framebuffers.remove(key);

        let was_active = matches!(
            &state.active,
            Some(ActiveFramebuffer::Object { binding_set: active, .. }) if *active == binding_set.id()
        );
        if was_active {
            state.active = None;
        }

        fbo_debug!(SOURCE, "Destroyed framebuffer object of binding set {}", binding_set.id());
        Ok(())
    }

    fn set_active(&mut self, binding_set: &RenderTargetBindingSet) -> Result<()> {
        let key = {
            let state = self.device.lock();
            *state.by_binding_set.get(&binding_set.id()).ok_or_else(|| {
                fbo_err!(SOURCE, "Binding set {} was activated before init", binding_set.id())
            })?
        };

        // Nothing bound: render to the window
        if !binding_set.has_attachments() && !binding_set.has_released_targets() {
            let mut state = self.device.lock();
            state.active = Some(ActiveFramebuffer::Default { extent: self.window_extent });
            state.activation_count += 1;
            return Ok(());
        }

        let attachments = self.resolve_attachments(binding_set)?;

        let mut state = self.device.lock();
        let framebuffer = state.framebuffers.get_mut(key).ok_or_else(|| {
            fbo_err!(SOURCE, "Framebuffer object of binding set {} is gone", binding_set.id())
        })?;
        framebuffer.attachments = Some(attachments.clone());
        framebuffer.activation_count += 1;
        state.active = Some(ActiveFramebuffer::Object {
            binding_set: binding_set.id(),
            attachments,
        });
        state.activation_count += 1;
        Ok(())
    }
}

impl Drop for SoftwareHal {
    fn drop(&mut self) {
        let state = self.device.lock();
        if !state.framebuffers.is_empty() {
            let owners: Vec<BindingSetId> = state.framebuffers.values().map(|fb| fb.binding_set).collect();
            fbo_warn!(SOURCE, "Software HAL dropped with {} live framebuffer object(s): {:?}",
                owners.len(), owners);
        }
    }
}
