//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (frame construction, inbound
//! request rejection, host-side line parsing, startup negotiation, link I/O).
use thiserror_no_std::Error;

//==================================================================================FRAME_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Violations of the `0 <= DLC <= 8, payload.len() == DLC` frame invariant.
pub enum FrameError {
    /// Payload longer than a classic CAN frame can carry.
    #[error("Payload too long: {len} bytes (max 8)")]
    PayloadTooLong { len: usize },
}

//==================================================================================INBOUND_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Reasons a binary transmit request read from the host link is dropped.
pub enum InboundError {
    /// Fewer bytes than identifier + DLC.
    #[error("Request too short: {len} bytes (min 5)")]
    TooShort { len: usize },
    /// DLC byte above 8: copying would overrun the fixed payload storage.
    #[error("DLC out of range: {dlc}")]
    DlcOutOfRange { dlc: u8 },
    /// DLC announces more payload bytes than the read delivered.
    #[error("Truncated payload: DLC {dlc}, {available} bytes available")]
    Truncated { dlc: u8, available: usize },
}

//==================================================================================LINE_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failures while parsing a device line on the host side.
pub enum LineError {
    /// Fewer than identifier + DLC + timestamp fields.
    #[error("Incomplete data frame received")]
    Incomplete,
    /// DLC announces more data fields than the line carries.
    #[error("Data frame missing expected fields")]
    MissingFields,
    /// DLC field above 8.
    #[error("DLC out of range: {dlc}")]
    DlcOutOfRange { dlc: u8 },
    /// A byte field is not a two-digit hexadecimal number.
    #[error("Invalid hex field at index {index}")]
    InvalidHex { index: usize },
    /// Timestamp or status code is not a number.
    #[error("Invalid numeric field")]
    InvalidNumber,
}

//==================================================================================NEGOTIATION_ERROR
#[derive(Error, Debug)]
/// Fatal startup failures. The bridge must not run after any of them.
pub enum NegotiationError<L: core::fmt::Debug, C: core::fmt::Debug> {
    /// Host link refused to discard stale input after the request.
    #[error("Host link flush error: {0:?}")]
    Link(L),
    /// Bus controller could not be installed or started with the preset.
    #[error("Bus configuration error: {0:?}")]
    Configure(C),
}

//==================================================================================RUNNER_ERRORS
#[derive(Error, Debug)]
/// Failures of a single decoder iteration. Never fatal for the loop.
pub enum DecoderError<E: core::fmt::Debug> {
    /// Writing the line to the host link failed.
    #[error("Host link write error: {0:?}")]
    Host(E),
    /// The line did not fit into the outbound buffer.
    #[error("Line buffer overflow")]
    LineOverflow,
}

#[derive(Error, Debug)]
/// Failures of a single encoder iteration. Never fatal for the loop.
pub enum EncoderError<E: core::fmt::Debug> {
    /// Reading from, or flushing, the host link failed.
    #[error("Host link read error: {0:?}")]
    Host(E),
}
