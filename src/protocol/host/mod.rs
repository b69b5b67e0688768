//! Host-side counterpart of the bridge, as used by the desktop acquisition
//! application: handshake formatting, transmit request encoding, device line
//! parsing, and timestamp rebasing.
//!
//! Everything here is `no_std` so the same code can back desktop tooling,
//! test benches, and a second board acting as host.
use core::fmt::Write;

use crate::core::{
    ID_FIELD_LEN, MAX_DLC, MAX_TRANSMIT_REQUEST_LEN, QUIET_LINE, RECEIVE_FAILURE_PREFIX,
};
use crate::error::LineError;
use crate::infra::codec::binary::encode_transmit_request as encode_binary;
use crate::protocol::transport::can_frame::{CanFrame, TimestampedFrame};

/// Bus bit rates offered to the user, slowest first.
pub const CAN_BIT_RATES: [u32; 8] = [
    25_000, 50_000, 100_000, 125_000, 250_000, 500_000, 800_000, 1_000_000,
];

/// Serial line rates offered for the host link. The device side runs at
/// [`HOST_LINK_BAUD_RATE`](crate::protocol::transport::HOST_LINK_BAUD_RATE).
pub const HOST_SERIAL_BAUD_RATES: [u32; 30] = [
    50, 75, 110, 134, 150, 200, 300, 600, 1_200, 1_800, 2_400, 4_800, 9_600, 19_200, 38_400,
    57_600, 115_200, 230_400, 460_800, 500_000, 576_000, 921_600, 1_000_000, 1_152_000,
    1_500_000, 2_000_000, 2_500_000, 3_000_000, 3_500_000, 4_000_000,
];

/// Handshake bytes: the rate zero-padded to six digits, newline-terminated
/// (`"025000\n"`, `"1000000\n"`).
pub fn bit_rate_request(bits_per_second: u32) -> heapless::String<12> {
    let mut request = heapless::String::new();
    let written = writeln!(request, "{:06}", bits_per_second);
    debug_assert!(written.is_ok(), "10 digits and a newline fit in 12 bytes");
    request
}

/// Maximum size of an encoded transmit request, terminator included.
pub const HOST_TRANSMIT_REQUEST_LEN: usize = MAX_TRANSMIT_REQUEST_LEN + 1;

/// Encode a frame the way the desktop application writes it: the binary
/// request followed by `\n`. The device ignores the terminator (it lies past
/// the DLC and is flushed).
pub fn encode_transmit_request(frame: &CanFrame) -> heapless::Vec<u8, HOST_TRANSMIT_REQUEST_LEN> {
    let mut raw = [0u8; MAX_TRANSMIT_REQUEST_LEN];
    let len = encode_binary(frame, &mut raw);

    let mut out = heapless::Vec::new();
    let fits = out.extend_from_slice(&raw[..len]).is_ok() && out.push(b'\n').is_ok();
    debug_assert!(fits, "capacity covers the largest request plus the terminator");
    out
}

//==================================================================================LINE_PARSER
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One device line, decoded.
pub enum HostEvent {
    Frame(TimestampedFrame),
    /// Quiet-bus heartbeat.
    Quiet,
    /// The device failed to receive; raw controller status.
    ReceiveFailed(u32),
}

/// Decode one line emitted by the device (with or without its newline).
///
/// Frame lines are split on commas with empty fields discarded, so a stray
/// trailing comma is tolerated. At least identifier + DLC + timestamp fields
/// are required, plus one field per data byte; the timestamp is always the
/// last field.
pub fn parse_line(line: &str) -> Result<HostEvent, LineError> {
    let line = line.trim();

    if line == QUIET_LINE.trim_end() {
        return Ok(HostEvent::Quiet);
    }
    if let Some(code) = line.strip_prefix(RECEIVE_FAILURE_PREFIX) {
        return u32::from_str_radix(code.trim(), 16)
            .map(HostEvent::ReceiveFailed)
            .map_err(|_| LineError::InvalidNumber);
    }

    let mut fields = [""; ID_FIELD_LEN + 1 + MAX_DLC + 1];
    let mut count = 0usize;
    let mut last = "";
    for field in line.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        if count < fields.len() {
            fields[count] = field;
        }
        count += 1;
        last = field;
    }

    if count < ID_FIELD_LEN + 2 {
        return Err(LineError::Incomplete);
    }

    let mut id_bytes = [0u8; ID_FIELD_LEN];
    for (index, byte) in id_bytes.iter_mut().enumerate() {
        *byte = parse_hex_byte(fields[index], index)?;
    }
    let id = u32::from_le_bytes(id_bytes);

    let dlc = parse_hex_byte(fields[ID_FIELD_LEN], ID_FIELD_LEN)?;
    if dlc as usize > MAX_DLC {
        return Err(LineError::DlcOutOfRange { dlc });
    }
    if count < ID_FIELD_LEN + 1 + dlc as usize + 1 {
        return Err(LineError::MissingFields);
    }

    let mut data = [0u8; MAX_DLC];
    let start = ID_FIELD_LEN + 1;
    for (offset, byte) in data[..dlc as usize].iter_mut().enumerate() {
        *byte = parse_hex_byte(fields[start + offset], start + offset)?;
    }

    let timestamp_us = last.parse::<u64>().map_err(|_| LineError::InvalidNumber)?;
    let frame = CanFrame::new(id, &data[..dlc as usize])
        .map_err(|_| LineError::DlcOutOfRange { dlc })?;

    Ok(HostEvent::Frame(TimestampedFrame::new(frame, timestamp_us)))
}

fn parse_hex_byte(field: &str, index: usize) -> Result<u8, LineError> {
    if field.len() > 2 {
        return Err(LineError::InvalidHex { index });
    }
    u8::from_str_radix(field, 16).map_err(|_| LineError::InvalidHex { index })
}

//==================================================================================TIMESTAMPS
/// Rebase device capture times onto a host time axis.
///
/// The first device timestamp seen is anchored to `host_origin_us`; later
/// ones keep their spacing relative to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampAligner {
    device_origin_us: Option<u64>,
}

impl TimestampAligner {
    pub const fn new() -> Self {
        Self {
            device_origin_us: None,
        }
    }

    /// Host time (µs) of a device capture time.
    ///
    /// Captures earlier than the anchor (device reset) clamp to the origin.
    pub fn align(&mut self, device_us: u64, host_origin_us: u64) -> u64 {
        let origin = *self.device_origin_us.get_or_insert(device_us);
        host_origin_us.saturating_add(device_us.saturating_sub(origin))
    }

    /// Forget the anchor, e.g. after reopening the link.
    pub fn reset(&mut self) {
        self.device_origin_us = None;
    }
}
