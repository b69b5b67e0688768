//! Monotonic microsecond clock used to stamp received frames.

/// Source of capture timestamps.
pub trait BridgeClock {
    /// Microseconds elapsed since an arbitrary, fixed origin (usually boot).
    fn now_micros(&self) -> u64;
}

/// Clock backed by the embassy time driver.
#[cfg(feature = "embassy-clock")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy-clock")]
impl BridgeClock for EmbassyClock {
    fn now_micros(&self) -> u64 {
        embassy_time::Instant::now().as_micros()
    }
}
