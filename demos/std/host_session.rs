//! # Host session demo
//!
//! What the desktop side of the bridge does with `can-daq`'s host codec:
//! build the handshake, encode a transmit request, and decode a captured
//! stream of device lines onto the host clock.
//!
//! ```bash
//! cargo run --example host_session
//! ```
use can_daq::protocol::{
    host::{bit_rate_request, encode_transmit_request, parse_line, HostEvent, TimestampAligner},
    transport::can_frame::CanFrame,
};
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    println!("=== can-daq host session ===");

    // 1. Handshake: the first bytes written after opening the port.
    let request = bit_rate_request(250_000);
    println!("Handshake bytes: {:?}", request.as_str());

    // 2. Transmit request for frame 0x456 / [11, 22].
    let frame = CanFrame::new(0x456, &[0x11, 0x22]).expect("payload fits a classic frame");
    let encoded = encode_transmit_request(&frame);
    println!("Transmit request: {:02X?}", encoded.as_slice());

    // 3. Lines as read from the device with `readline()`.
    let captured = [
        "Nothing\n",
        "23,01,00,00,03,AA,BB,CC,1000000\n",
        "56,04,00,00,02,11,22,1002500\n",
        "Failed to receive message, error code: 0107\n",
        "23,01,00,00\n",
    ];

    let host_origin_us = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_micros() as u64)
        .unwrap_or(0);
    let mut aligner = TimestampAligner::new();

    for line in captured {
        match parse_line(line) {
            Ok(HostEvent::Frame(received)) => {
                let at = aligner.align(received.timestamp_us, host_origin_us);
                println!(
                    "→ id=0x{:03X} dlc={} data={:02X?} at {} µs",
                    received.frame.id(),
                    received.frame.dlc(),
                    received.frame.data(),
                    at
                );
            }
            Ok(HostEvent::Quiet) => println!("· bus quiet"),
            Ok(HostEvent::ReceiveFailed(code)) => println!("✗ device receive failure 0x{code:04x}"),
            Err(err) => println!("✗ unparsable line {:?}: {}", line.trim_end(), err),
        }
    }
}
