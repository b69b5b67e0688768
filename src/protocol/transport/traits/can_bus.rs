//! Minimal abstraction for the bus controller, split into a receive half and a
//! transmit half so each bridge direction owns exactly one of them.
use crate::protocol::transport::can_frame::CanFrame;
use embassy_time::Duration;
use futures_util::Future;

/// Raw numeric status of a peripheral error, reported verbatim to the host.
pub trait StatusCode {
    fn status_code(&self) -> u32;
}

impl StatusCode for u32 {
    fn status_code(&self) -> u32 {
        *self
    }
}

/// Signed driver codes (e.g. `esp_err_t`) are reported as their `u32` bit pattern.
impl StatusCode for i32 {
    fn status_code(&self) -> u32 {
        *self as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Outcome of a bounded receive that did not yield a frame.
pub enum ReceiveError<E> {
    /// No frame arrived within the wait window.
    Timeout,
    /// The controller reported a failure.
    Bus(E),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Outcome of a bounded transmit that did not queue the frame.
pub enum TransmitError<E> {
    /// The controller had no room for the frame within the wait window.
    Timeout,
    /// The controller reported a failure.
    Bus(E),
}

/// Receive half of the bus controller.
pub trait CanReceiver {
    type Error: core::fmt::Debug + StatusCode;
    /// Wait at most `timeout` for the next frame.
    ///
    /// Implementations **MUST** honor the bound; the decoder relies on it to
    /// emit its heartbeat.
    fn receive<'a>(
        &'a mut self,
        timeout: Duration,
    ) -> impl Future<Output = Result<CanFrame, ReceiveError<Self::Error>>> + 'a;
}

/// Transmit half of the bus controller.
pub trait CanTransmitter {
    type Error: core::fmt::Debug + StatusCode;
    /// Queue `frame` for transmission, waiting at most `timeout` for room.
    fn transmit<'a>(
        &'a mut self,
        frame: &'a CanFrame,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), TransmitError<Self::Error>>> + 'a;
}
