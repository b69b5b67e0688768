//! Outbound (bus → host) text encoding. One newline-terminated ASCII line per
//! bus event:
//!
//! ```text
//! 23,01,00,00,03,AA,BB,CC,1234567   frame: id LE, DLC, data, timestamp (µs)
//! Nothing                           no frame within the receive window
//! Failed to receive message, error code: 0107
//! ```
//!
//! Writers target any [`core::fmt::Write`], so lines can be assembled in a
//! stack buffer ([`Line`]) before a single write to the host link.
use core::fmt::{self, Write};

use crate::core::{LINE_CAPACITY, QUIET_LINE, RECEIVE_FAILURE_PREFIX};
use crate::protocol::transport::can_frame::TimestampedFrame;

/// Stack buffer able to hold any outbound line.
pub type Line = heapless::String<LINE_CAPACITY>;

/// Write the frame line: four identifier bytes (little-endian), the DLC and
/// each data byte as two uppercase hex digits followed by a comma, then the
/// decimal timestamp and a newline.
pub fn write_frame_line<W: Write>(out: &mut W, received: &TimestampedFrame) -> fmt::Result {
    let frame = &received.frame;
    for byte in frame.id_bytes() {
        write!(out, "{:02X},", byte)?;
    }
    write!(out, "{:02X},", frame.dlc())?;
    for byte in frame.data() {
        write!(out, "{:02X},", byte)?;
    }
    writeln!(out, "{}", received.timestamp_us)
}

/// Write the quiet-bus heartbeat.
pub fn write_quiet_line<W: Write>(out: &mut W) -> fmt::Result {
    out.write_str(QUIET_LINE)
}

/// Write the receive-failure report with the controller's raw status code.
pub fn write_receive_failure_line<W: Write>(out: &mut W, status_code: u32) -> fmt::Result {
    writeln!(out, "{}{:04x}", RECEIVE_FAILURE_PREFIX, status_code)
}

/// Render a frame line into a fresh [`Line`].
pub fn frame_line(received: &TimestampedFrame) -> Result<Line, fmt::Error> {
    let mut line = Line::new();
    write_frame_line(&mut line, received)?;
    Ok(line)
}
