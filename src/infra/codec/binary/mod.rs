//! Inbound (host → bus) binary encoding. No delimiter, fixed layout:
//!
//! ```text
//! [0..4)       identifier, little-endian u32
//! [4]          DLC (0..=8)
//! [5..5+DLC)   payload
//! ```
//!
//! Bytes past the payload are ignored; the encoder flushes them from the link.
use crate::core::{ID_FIELD_LEN, MAX_DLC, MAX_TRANSMIT_REQUEST_LEN, MIN_TRANSMIT_REQUEST_LEN};
use crate::error::InboundError;
use crate::protocol::transport::can_frame::CanFrame;

/// Decode a transmit request as read from the host link.
///
/// The DLC is checked against the 8-byte bound before any payload byte is
/// copied; a DLC pointing past the received bytes is rejected as well.
pub fn decode_transmit_request(buf: &[u8]) -> Result<CanFrame, InboundError> {
    if buf.len() < MIN_TRANSMIT_REQUEST_LEN {
        return Err(InboundError::TooShort { len: buf.len() });
    }

    let mut id_bytes = [0u8; ID_FIELD_LEN];
    id_bytes.copy_from_slice(&buf[..ID_FIELD_LEN]);
    let id = u32::from_le_bytes(id_bytes);

    let dlc = buf[ID_FIELD_LEN];
    if dlc as usize > MAX_DLC {
        return Err(InboundError::DlcOutOfRange { dlc });
    }

    let payload = &buf[MIN_TRANSMIT_REQUEST_LEN..];
    if payload.len() < dlc as usize {
        return Err(InboundError::Truncated {
            dlc,
            available: payload.len(),
        });
    }

    CanFrame::new(id, &payload[..dlc as usize])
        .map_err(|_| InboundError::DlcOutOfRange { dlc })
}

/// Encode `frame` into `out`, returning the number of bytes written
/// (`5 + DLC`).
pub fn encode_transmit_request(frame: &CanFrame, out: &mut [u8; MAX_TRANSMIT_REQUEST_LEN]) -> usize {
    out[..ID_FIELD_LEN].copy_from_slice(&frame.id_bytes());
    out[ID_FIELD_LEN] = frame.dlc();
    let end = MIN_TRANSMIT_REQUEST_LEN + frame.data().len();
    out[MIN_TRANSMIT_REQUEST_LEN..end].copy_from_slice(frame.data());
    end
}
