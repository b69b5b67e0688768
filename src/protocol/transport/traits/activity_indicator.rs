//! Diagnostic output toggled around in-flight bridge work (typically a LED).
//!
//! Both runners hold a shared reference and write it without coordination.
//! The signal is never read back for control decisions, so overlapping
//! set/clear from the two directions is accepted.
use core::sync::atomic::{AtomicBool, Ordering};

/// Write-only boolean output.
pub trait ActivityIndicator {
    fn set_active(&self, active: bool);
}

impl<I: ActivityIndicator + ?Sized> ActivityIndicator for &I {
    fn set_active(&self, active: bool) {
        (**self).set_active(active)
    }
}

/// Indicator kept in memory, for boards without a status output or for
/// mirroring activity elsewhere.
#[derive(Debug, Default)]
pub struct AtomicIndicator {
    state: AtomicBool,
}

impl AtomicIndicator {
    pub const fn new() -> Self {
        Self {
            state: AtomicBool::new(false),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.load(Ordering::Relaxed)
    }
}

impl ActivityIndicator for AtomicIndicator {
    fn set_active(&self, active: bool) {
        self.state.store(active, Ordering::Relaxed);
    }
}

/// No-op indicator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIndicator;

impl ActivityIndicator for NoIndicator {
    fn set_active(&self, _active: bool) {}
}
