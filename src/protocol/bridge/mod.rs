//! CAN ↔ host bridge built from the peripheral traits.
//!
//! The lifecycle is:
//!
//! 1. [`BridgeService::start`] runs the bit-rate handshake once and starts the
//!    bus controller (a failure here is fatal);
//! 2. the service is split with [`BridgeService::into_parts`] into a
//!    [`DecoderRunner`] (bus → host) and an [`EncoderRunner`] (host → bus),
//!    or driven as a whole with [`BridgeService::run`].
//!
//! The runners never talk to each other. Each owns the half of the bus
//! controller and the half of the host link it needs; the only thing they
//! share is the activity indicator, by reference and without locking.
//!
//! On an executor with task spawning the encoder is spawned and the decoder
//! runs in the main task:
//!
//! ```rust,ignore
//! let indicator = INDICATOR.init(LedIndicator::new(led));
//! let service = BridgeService::start(peripherals, &mut twai_config, indicator, BridgeConfig::new())
//!     .await
//!     .expect("bus configuration failed");
//! let parts = service.into_parts();
//! spawner.spawn(encoder_task(parts.encoder)).unwrap();
//! parts.decoder.run().await
//! ```
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod negotiator;

pub use config::BridgeConfig;
pub use decoder::{DecodeOutcome, DecoderRunner};
pub use encoder::{EncodeOutcome, EncoderRunner};
pub use negotiator::negotiate_bit_rate;

use futures_util::future::join;

use crate::error::NegotiationError;
use crate::protocol::bit_rate::BitRatePreset;
use crate::protocol::transport::traits::{
    activity_indicator::ActivityIndicator,
    bridge_clock::BridgeClock,
    bus_configurator::BusConfigurator,
    can_bus::{CanReceiver, CanTransmitter},
    host_link::{HostLinkRx, HostLinkTx},
};

/// Direction-specific peripheral halves handed over by the board bring-up.
pub struct BridgePeripherals<R, T, HR, HT, C> {
    /// Receive half of the bus controller (decoder).
    pub can_rx: R,
    /// Transmit half of the bus controller (encoder).
    pub can_tx: T,
    /// Inbound half of the host link (handshake, then encoder).
    pub host_rx: HR,
    /// Outbound half of the host link (decoder).
    pub host_tx: HT,
    /// Capture clock for received frames.
    pub clock: C,
}

/// Bridge context, built once at startup after a successful handshake.
pub struct BridgeService<'a, R, T, HR, HT, C, I: ?Sized> {
    peripherals: BridgePeripherals<R, T, HR, HT, C>,
    indicator: &'a I,
    config: BridgeConfig,
    preset: BitRatePreset,
}

impl<'a, R, T, HR, HT, C, I> BridgeService<'a, R, T, HR, HT, C, I>
where
    R: CanReceiver,
    T: CanTransmitter,
    HR: HostLinkRx,
    HT: HostLinkTx,
    C: BridgeClock,
    I: ActivityIndicator + ?Sized,
{
    /// Negotiate the bit rate with the host, configure the bus controller, and
    /// build the service.
    ///
    /// The indicator is cleared before the handshake so both runners start
    /// from a known state.
    pub async fn start<B: BusConfigurator>(
        mut peripherals: BridgePeripherals<R, T, HR, HT, C>,
        configurator: &mut B,
        indicator: &'a I,
        config: BridgeConfig,
    ) -> Result<Self, NegotiationError<HR::Error, B::Error>> {
        indicator.set_active(false);
        let preset = negotiate_bit_rate(&mut peripherals.host_rx, configurator, &config).await?;

        Ok(Self {
            peripherals,
            indicator,
            config,
            preset,
        })
    }

    /// Preset the bus controller was started with.
    pub fn preset(&self) -> BitRatePreset {
        self.preset
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Split into the two runners.
    pub fn into_parts(self) -> BridgeParts<'a, R, T, HR, HT, C, I> {
        let BridgePeripherals {
            can_rx,
            can_tx,
            host_rx,
            host_tx,
            clock,
        } = self.peripherals;

        BridgeParts {
            decoder: DecoderRunner::new(
                can_rx,
                host_tx,
                clock,
                self.indicator,
                self.config.receive_timeout,
            ),
            encoder: EncoderRunner::new(
                host_rx,
                can_tx,
                self.indicator,
                self.config.host_read_timeout,
                self.config.transmit_timeout,
            ),
        }
    }

    /// Drive both directions concurrently inside a single future, for
    /// executors without task spawning. Never returns.
    pub async fn run(self) -> ! {
        let BridgeParts { decoder, encoder } = self.into_parts();
        let (never, _) = join(decoder.run(), encoder.run()).await;
        never
    }
}

/// Bundle returned by [`BridgeService::into_parts`].
pub struct BridgeParts<'a, R, T, HR, HT, C, I: ?Sized> {
    pub decoder: DecoderRunner<'a, R, HT, C, I>,
    pub encoder: EncoderRunner<'a, HR, T, I>,
}
