//! Integration tests for binding sets and render contexts
//!
//! A recording HAL and host-side allocations are defined here, the way a
//! host runtime would provide them. No GPU required.
//!
//! Run with: cargo test --test binding_integration_tests

use fbo_cache::fbo::{
    BackendRegistry, ContextConfig, Logging, Error, FramebufferHal, RenderTargetBindingSet, Result,
};
use fbo_cache::fbo::allocation::{Allocation, AllocationInfo, AllocationUsage, TextureFormat};
use fbo_cache::fbo::log::{Logger, LogEntry, LogSeverity};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

// ============================================================================
// HOST-SIDE TEST DOUBLES
// ============================================================================

struct HostAllocation {
    info: AllocationInfo,
    name: String,
}

fn allocation(name: &str, usage: AllocationUsage) -> Arc<dyn Allocation> {
    Arc::new(HostAllocation {
        info: AllocationInfo {
            width: 128,
            height: 128,
            format: TextureFormat::R8G8B8A8_UNORM,
            usage,
        },
        name: name.to_string(),
    })
}

impl Allocation for HostAllocation {
    fn info(&self) -> &AllocationInfo {
        &self.info
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Snapshot pushed to the HAL: color slot names, depth name
type Pushed = (Vec<Option<String>>, Option<String>);

#[derive(Clone, Default)]
struct RecordingHal {
    pushes: Arc<Mutex<Vec<Pushed>>>,
}

impl FramebufferHal for RecordingHal {
    fn name(&self) -> &str {
        "recording"
    }

    fn init(&mut self, _binding_set: &RenderTargetBindingSet) -> Result<()> {
        Ok(())
    }

    fn destroy(&mut self, _binding_set: &RenderTargetBindingSet) -> Result<()> {
        Ok(())
    }

    fn set_active(&mut self, binding_set: &RenderTargetBindingSet) -> Result<()> {
        let color = binding_set
            .color_targets()
            .map(|t| t.map(|a| a.name().to_string()))
            .collect();
        let depth = binding_set.depth_target().map(|a| a.name().to_string());
        self.pushes.lock().unwrap().push((color, depth));
        Ok(())
    }
}

struct ThreadLogger {
    thread: ThreadId,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for ThreadLogger {
    fn log(&self, entry: &LogEntry) {
        if thread::current().id() == self.thread {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

fn capture_logs() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Logging::set_logger(ThreadLogger {
        thread: thread::current().id(),
        entries: entries.clone(),
    });
    entries
}

fn color_capable(name: &str) -> Arc<dyn Allocation> {
    allocation(name, AllocationUsage::TEXTURE | AllocationUsage::RENDER_TARGET)
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
#[serial]
fn test_integration_rejected_bind_is_logged_and_slot_stays_empty() {
    let entries = capture_logs();

    let mut hal = RecordingHal::default();
    let mut set = RenderTargetBindingSet::new(2);
    set.initialize_hardware(&mut hal).unwrap();

    let a = color_capable("A");
    let x = allocation("X", AllocationUsage::SCRIPT);
    set.bind_color_target(Some(&a), 0).unwrap();
    let rejected = set.bind_color_target(Some(&x), 1);
    set.flush(&mut hal).unwrap();
    set.teardown_hardware(&mut hal).unwrap();

    let captured = entries.lock().unwrap().clone();
    Logging::reset_logger();

    assert!(matches!(rejected, Err(Error::InvalidBinding(_))));
    assert_eq!(
        hal.pushes.lock().unwrap().clone(),
        vec![(vec![Some("A".to_string()), None], None)]
    );
    assert!(captured
        .iter()
        .any(|e| e.severity == LogSeverity::Error && e.message.contains("'X'")));
}

#[test]
fn test_integration_reset_then_flush_twice() {
    let mut hal = RecordingHal::default();
    let mut set = RenderTargetBindingSet::new(2);
    set.initialize_hardware(&mut hal).unwrap();

    let a = color_capable("a");
    let d = allocation("d", AllocationUsage::RENDER_TARGET);
    set.bind_color_target(Some(&a), 0).unwrap();
    set.bind_color_target(Some(&a), 1).unwrap();
    set.bind_depth_target(Some(&d)).unwrap();
    assert!(set.flush(&mut hal).unwrap());

    set.reset_all();
    assert!(set.flush(&mut hal).unwrap());
    assert!(!set.flush(&mut hal).unwrap());

    set.teardown_hardware(&mut hal).unwrap();

    let pushes = hal.pushes.lock().unwrap().clone();
    assert_eq!(pushes.len(), 2);
    assert_eq!(pushes[1], (vec![None, None], None));
}

#[test]
fn test_integration_dirty_state_machine() {
    let mut hal = RecordingHal::default();
    let mut set = RenderTargetBindingSet::new(1);
    assert!(set.is_dirty());

    set.flush(&mut hal).unwrap();
    assert!(!set.is_dirty());

    // A rejected bind does not dirty a clean set
    let x = allocation("x", AllocationUsage::VERTEX);
    assert!(set.bind_depth_target(Some(&x)).is_err());
    assert!(!set.is_dirty());

    set.bind_color_target(None, 0).unwrap();
    assert!(set.is_dirty());
}

#[test]
fn test_integration_context_through_registry() {
    let hal = RecordingHal::default();
    let pushes = hal.pushes.clone();

    let mut registry = BackendRegistry::new();
    registry
        .register_backend("recording", move |_config: &ContextConfig| {
            Ok(Box::new(hal.clone()) as Box<dyn FramebufferHal>)
        })
        .unwrap();

    let config = ContextConfig::default().with_backend("recording").with_color_targets(3);
    let mut context = registry.create_context(&config).unwrap();

    let a = color_capable("a");
    context.bind_color_target(Some(&a), 2).unwrap();
    context.setup_framebuffer().unwrap();
    context.setup_framebuffer().unwrap();
    context.destroy().unwrap();

    let pushes = pushes.lock().unwrap().clone();
    assert_eq!(pushes, vec![(vec![None, None, Some("a".to_string())], None)]);
}
