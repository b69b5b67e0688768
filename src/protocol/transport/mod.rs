//! Bridge transport layer: the CAN frame representation, peripheral
//! abstraction traits, and the timing defaults of both directions.
//!
//! ## Timing constants
//!
//! Every suspension point of the bridge is a bounded wait. The values below
//! are the defaults used by [`BridgeConfig`](crate::protocol::bridge::BridgeConfig).

pub mod can_frame;
pub mod traits;

/// Receive window of the decoder (ms).
///
/// A window expiring without a frame produces the `Nothing` heartbeat, so the
/// host sees one line per second on a quiet bus and can tell a silent bus
/// from a dead link.
pub const CAN_RECEIVE_TIMEOUT_MS: u64 = 1_000;

/// Transmit window of the encoder (ms).
///
/// [`CanTransmitter`](traits::can_bus::CanTransmitter) implementations
/// **MUST** give up after this delay when the controller TX queue stays full
/// (bus-off, no acknowledging node).
pub const CAN_TRANSMIT_TIMEOUT_MS: u64 = 1_000;

/// Read window of the encoder on the host link (ms).
pub const HOST_READ_TIMEOUT_MS: u64 = 1_000;

/// Per-attempt read window while waiting for the bit-rate request (ms).
pub const NEGOTIATION_POLL_TIMEOUT_MS: u64 = 100;

/// Line rate of the host serial link (8 data bits, no parity, 1 stop bit,
/// no flow control). Configured by the board bring-up, not by this crate.
pub const HOST_LINK_BAUD_RATE: u32 = 1_000_000;
