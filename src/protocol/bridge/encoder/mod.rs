//! Host → bus direction: read binary transmit requests from the host link and
//! queue them on the bus controller.
use embassy_time::Duration;

use crate::core::{MAX_TRANSMIT_REQUEST_LEN, MIN_TRANSMIT_REQUEST_LEN};
use crate::error::{EncoderError, InboundError};
use crate::infra::codec::binary::decode_transmit_request;
use crate::protocol::transport::{
    can_frame::CanFrame,
    traits::{
        activity_indicator::ActivityIndicator,
        can_bus::{CanTransmitter, StatusCode, TransmitError},
        host_link::HostLinkRx,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// What a single encoder iteration did.
pub enum EncodeOutcome {
    /// The read window expired with nothing received.
    Idle,
    /// The request was discarded without reaching the bus.
    Dropped(InboundError),
    /// The frame was queued on the bus controller.
    Transmitted(CanFrame),
    /// The controller had no room within the transmit window.
    TransmitTimedOut(CanFrame),
    /// The controller rejected the frame.
    TransmitFailed { frame: CanFrame, status_code: u32 },
}

/// Perpetual host → bus loop. Owns the inbound half of the host link and the
/// transmit half of the bus controller.
pub struct EncoderRunner<'a, H, T, I: ?Sized> {
    host_rx: H,
    can_tx: T,
    indicator: &'a I,
    read_timeout: Duration,
    transmit_timeout: Duration,
}

impl<'a, H, T, I> EncoderRunner<'a, H, T, I>
where
    H: HostLinkRx,
    T: CanTransmitter,
    I: ActivityIndicator + ?Sized,
{
    pub fn new(
        host_rx: H,
        can_tx: T,
        indicator: &'a I,
        read_timeout: Duration,
        transmit_timeout: Duration,
    ) -> Self {
        Self {
            host_rx,
            can_tx,
            indicator,
            read_timeout,
            transmit_timeout,
        }
    }

    /// Read once from the host link and forward what was read.
    ///
    /// Every read is taken on its own: a request split over two reads is
    /// dropped, never reassembled. After any non-empty read the inbound
    /// buffer is flushed so the next read starts on a request boundary.
    pub async fn step(&mut self) -> Result<EncodeOutcome, EncoderError<H::Error>> {
        let mut buf = [0u8; MAX_TRANSMIT_REQUEST_LEN];
        let len = self
            .host_rx
            .read(&mut buf, self.read_timeout)
            .await
            .map_err(EncoderError::Host)?;

        if len == 0 {
            return Ok(EncodeOutcome::Idle);
        }

        if len < MIN_TRANSMIT_REQUEST_LEN {
            #[cfg(feature = "defmt")]
            defmt::trace!("Dropping {} byte read", len);
            self.flush().await?;
            return Ok(EncodeOutcome::Dropped(InboundError::TooShort { len }));
        }

        self.indicator.set_active(true);
        let outcome = match decode_transmit_request(&buf[..len]) {
            Ok(frame) => self.transmit(frame).await,
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Rejected transmit request: {}", err);
                EncodeOutcome::Dropped(err)
            }
        };
        self.indicator.set_active(false);

        self.flush().await?;
        Ok(outcome)
    }

    /// Loop forever. Iteration failures are logged and the next read starts
    /// immediately.
    pub async fn run(mut self) -> ! {
        loop {
            if let Err(_err) = self.step().await {
                #[cfg(feature = "defmt")]
                defmt::warn!("Encoder iteration failed: {:?}", defmt::Debug2Format(&_err));
            }
        }
    }

    async fn transmit(&mut self, frame: CanFrame) -> EncodeOutcome {
        match self.can_tx.transmit(&frame, self.transmit_timeout).await {
            Ok(()) => EncodeOutcome::Transmitted(frame),
            Err(TransmitError::Timeout) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Transmit timed out for id {=u32:#x}", frame.id());
                EncodeOutcome::TransmitTimedOut(frame)
            }
            Err(TransmitError::Bus(err)) => {
                let status_code = err.status_code();
                #[cfg(feature = "defmt")]
                defmt::warn!("Transmit failed, status {=u32:#x}", status_code);
                EncodeOutcome::TransmitFailed { frame, status_code }
            }
        }
    }

    async fn flush(&mut self) -> Result<(), EncoderError<H::Error>> {
        self.host_rx.flush_input().await.map_err(EncoderError::Host)
    }
}
