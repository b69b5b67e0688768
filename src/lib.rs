//! `can-daq` library: the protocol engine of a CAN bus to serial link bridge
//! in a `no_std` environment. The crate exposes the wire codecs, the
//! peripheral abstraction traits, the startup bit-rate handshake, and the two
//! perpetual runners moving frames between the bus and the host.
#![no_std]
//==================================================================================
/// Wire-level sizes and fixed strings shared by both link directions.
pub mod core;
/// Frame construction, inbound request, line parsing, startup, and runner
/// I/O errors.
pub mod error;
/// Host-link codecs: ASCII lines out, binary transmit requests in.
pub mod infra;
/// Bridge implementation: CAN transport, bit-rate presets, decoder and
/// encoder runners, and the host-side codec.
pub mod protocol;
//==================================================================================
