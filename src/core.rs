//! Wire-level contract shared by the device runners and the host-side codec.
//!
//! Both directions of the bridge are fixed-layout: the host writes binary
//! transmit requests, the device answers with one ASCII line per bus event.
//! Every size used to dimension a stack buffer lives here.

/// Maximum payload carried by a classic CAN frame.
pub const MAX_DLC: usize = 8;

/// Width of the identifier field in both wire formats (little-endian `u32`).
pub const ID_FIELD_LEN: usize = 4;

/// Smallest binary transmit request: identifier + DLC, empty payload.
pub const MIN_TRANSMIT_REQUEST_LEN: usize = ID_FIELD_LEN + 1;

/// Largest binary transmit request: identifier + DLC + eight data bytes.
pub const MAX_TRANSMIT_REQUEST_LEN: usize = MIN_TRANSMIT_REQUEST_LEN + MAX_DLC;

/// Longest bit-rate request accepted during the startup handshake (`"1000000"`).
pub const MAX_BIT_RATE_REQUEST_LEN: usize = 7;

/// Capacity of an outbound line buffer.
///
/// Worst case is a frame line: 13 hex fields of 3 bytes (`"XX,"`), a 20 digit
/// `u64` timestamp and the newline, i.e. 60 bytes.
pub const LINE_CAPACITY: usize = 64;

/// Sentinel emitted when the bus stayed quiet for a whole receive window.
pub const QUIET_LINE: &str = "Nothing\n";

/// Prefix of the line reporting a bus controller receive failure.
pub const RECEIVE_FAILURE_PREFIX: &str = "Failed to receive message, error code: ";
