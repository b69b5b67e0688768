//! Bridge protocol: frame transport and peripheral traits, bit-rate presets,
//! the device-side runners, and the host-side counterpart.
pub mod bit_rate;
pub mod bridge;
pub mod host;
pub mod transport;
