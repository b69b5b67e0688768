//! In-memory representation of a classic CAN frame crossing the bridge.
use crate::core::MAX_DLC;
use crate::error::FrameError;
use embedded_can::{ExtendedId, Id, StandardId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Classic CAN frame as exchanged with the bus controller.
///
/// Fields are private so that `dlc <= 8` always holds: every constructor
/// validates the payload length before copying into the fixed buffer.
pub struct CanFrame {
    /// Raw identifier, transported as a little-endian `u32` on the host link.
    id: u32,
    /// Payload buffer. Bytes past `dlc` are always zero.
    data: [u8; MAX_DLC],
    /// Data Length Code, 0 to 8.
    dlc: u8,
}

impl CanFrame {
    /// Build a frame from an identifier and a payload of at most eight bytes.
    pub fn new(id: u32, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_DLC {
            return Err(FrameError::PayloadTooLong { len: payload.len() });
        }
        let mut data = [0u8; MAX_DLC];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            data,
            dlc: payload.len() as u8,
        })
    }

    /// Raw identifier.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Data Length Code.
    #[inline]
    pub fn dlc(&self) -> u8 {
        self.dlc
    }

    /// Populated payload bytes (`dlc` of them).
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlc as usize]
    }

    /// Identifier bytes in host-link order (little-endian).
    #[inline]
    pub fn id_bytes(&self) -> [u8; 4] {
        self.id.to_le_bytes()
    }
}

//==================================================================================TIMESTAMPED_FRAME
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Frame received from the bus, stamped when reception completed.
pub struct TimestampedFrame {
    pub frame: CanFrame,
    /// Monotonic capture time in microseconds.
    pub timestamp_us: u64,
}

impl TimestampedFrame {
    pub fn new(frame: CanFrame, timestamp_us: u64) -> Self {
        Self {
            frame,
            timestamp_us,
        }
    }
}

//==================================================================================EMBEDDED_CAN
/// The bridge carries a raw identifier without an IDE flag: the frame format
/// is derived from the value, so an extended id at or below `0x7FF` reads back
/// as [`Id::Standard`].
impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let raw = match id.into() {
            Id::Standard(id) => id.as_raw() as u32,
            Id::Extended(id) => id.as_raw(),
        };
        CanFrame::new(raw, data).ok()
    }

    /// Remote frames are never produced nor forwarded by the bridge.
    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        self.id > StandardId::MAX.as_raw() as u32
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        match StandardId::new(self.id as u16).filter(|_| !self.is_extended()) {
            Some(id) => Id::Standard(id),
            // Raw values above 29 bits are masked; the wire field is wider than the bus.
            None => Id::Extended(
                ExtendedId::new(self.id & ExtendedId::MAX.as_raw()).unwrap_or(ExtendedId::ZERO),
            ),
        }
    }

    fn dlc(&self) -> usize {
        self.dlc as usize
    }

    fn data(&self) -> &[u8] {
        CanFrame::data(self)
    }
}
