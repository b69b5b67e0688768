//! Runtime configuration of the bridge: the bounded waits of every
//! suspension point.
use embassy_time::Duration;

use crate::protocol::transport::{
    CAN_RECEIVE_TIMEOUT_MS, CAN_TRANSMIT_TIMEOUT_MS, HOST_READ_TIMEOUT_MS,
    NEGOTIATION_POLL_TIMEOUT_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Timeouts used by the negotiator and both runners.
pub struct BridgeConfig {
    /// Decoder receive window; expiry emits the `Nothing` heartbeat.
    pub receive_timeout: Duration,
    /// Encoder transmit window.
    pub transmit_timeout: Duration,
    /// Encoder read window on the host link.
    pub host_read_timeout: Duration,
    /// Per-attempt read window of the startup handshake.
    pub negotiation_poll_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeConfig {
    /// Default timings (1 s windows, 100 ms handshake polling).
    pub const fn new() -> Self {
        Self {
            receive_timeout: Duration::from_millis(CAN_RECEIVE_TIMEOUT_MS),
            transmit_timeout: Duration::from_millis(CAN_TRANSMIT_TIMEOUT_MS),
            host_read_timeout: Duration::from_millis(HOST_READ_TIMEOUT_MS),
            negotiation_poll_timeout: Duration::from_millis(NEGOTIATION_POLL_TIMEOUT_MS),
        }
    }

    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    pub fn with_transmit_timeout(mut self, timeout: Duration) -> Self {
        self.transmit_timeout = timeout;
        self
    }

    pub fn with_host_read_timeout(mut self, timeout: Duration) -> Self {
        self.host_read_timeout = timeout;
        self
    }

    pub fn with_negotiation_poll_timeout(mut self, timeout: Duration) -> Self {
        self.negotiation_poll_timeout = timeout;
        self
    }
}
