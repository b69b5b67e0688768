//! Both host-link encodings: the ASCII line format emitted by the device
//! (`line`) and the binary transmit request read by the device (`binary`).
pub mod binary;
pub mod line;
