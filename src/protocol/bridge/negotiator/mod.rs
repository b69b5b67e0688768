//! Startup handshake: the host sends its bus bit rate as ASCII decimal text
//! before anything else, the device picks the matching preset and starts the
//! bus controller with it.
use crate::core::MAX_BIT_RATE_REQUEST_LEN;
use crate::error::NegotiationError;
use crate::protocol::bit_rate::{parse_bit_rate_request, BitRatePreset};
use crate::protocol::bridge::BridgeConfig;
use crate::protocol::transport::traits::{bus_configurator::BusConfigurator, host_link::HostLinkRx};

/// Wait for the host's bit-rate request, then configure the bus controller.
///
/// Steps:
/// 1. Poll the host link until at least one byte arrives (read errors are
///    retried, this is a gate, not a steady-state operation).
/// 2. Flush the rest of the inbound buffer so stale handshake bytes are never
///    decoded as transmit requests.
/// 3. Select the preset; unsupported values silently fall back to 250 kbit/s.
/// 4. Hand the preset to `configurator`.
///
/// The read is a single bounded read of at most seven bytes: a request split
/// across several host writes is seen truncated.
///
/// # Errors
///
/// Returns [`NegotiationError`] when the flush or the bus configuration
/// fails. Both are fatal; the bridge must not be started.
pub async fn negotiate_bit_rate<H, B>(
    host_rx: &mut H,
    configurator: &mut B,
    config: &BridgeConfig,
) -> Result<BitRatePreset, NegotiationError<H::Error, B::Error>>
where
    H: HostLinkRx,
    B: BusConfigurator,
{
    let mut request = [0u8; MAX_BIT_RATE_REQUEST_LEN];

    let len = loop {
        match host_rx
            .read(&mut request, config.negotiation_poll_timeout)
            .await
        {
            Ok(0) => continue,
            Ok(len) => break len,
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Bit-rate request read failed: {:?}",
                    defmt::Debug2Format(&_err)
                );
                continue;
            }
        }
    };

    host_rx.flush_input().await.map_err(NegotiationError::Link)?;

    let requested = parse_bit_rate_request(&request[..len]);
    let preset = BitRatePreset::select(requested);

    #[cfg(feature = "defmt")]
    {
        if requested != Some(preset.bits_per_second() as i64) {
            defmt::warn!(
                "Unsupported bit rate request, falling back to {} bps",
                preset.bits_per_second()
            );
        }
        defmt::info!("Configuring bus at {} bps", preset.bits_per_second());
    }

    configurator
        .configure(preset)
        .await
        .map_err(NegotiationError::Configure)?;

    Ok(preset)
}
