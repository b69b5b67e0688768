//! Bus → host direction: receive frames from the controller, stamp them and
//! forward them as text lines. Also emits the quiet-bus heartbeat and the
//! receive-failure reports.
use embassy_time::Duration;

use crate::error::DecoderError;
use crate::infra::codec::line::{
    write_frame_line, write_quiet_line, write_receive_failure_line, Line,
};
use crate::protocol::transport::{
    can_frame::TimestampedFrame,
    traits::{
        activity_indicator::ActivityIndicator,
        bridge_clock::BridgeClock,
        can_bus::{CanReceiver, ReceiveError, StatusCode},
        host_link::HostLinkTx,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// What a single decoder iteration reported to the host.
pub enum DecodeOutcome {
    /// A frame was received and its line written.
    Forwarded(TimestampedFrame),
    /// The receive window expired; `Nothing` was written.
    Quiet,
    /// The controller failed; the raw status code was written.
    ReceiveFailed(u32),
}

/// Perpetual bus → host loop. Owns the receive half of the bus controller and
/// the outbound half of the host link.
pub struct DecoderRunner<'a, R, H, C, I: ?Sized> {
    can_rx: R,
    host_tx: H,
    clock: C,
    indicator: &'a I,
    receive_timeout: Duration,
}

impl<'a, R, H, C, I> DecoderRunner<'a, R, H, C, I>
where
    R: CanReceiver,
    H: HostLinkTx,
    C: BridgeClock,
    I: ActivityIndicator + ?Sized,
{
    pub fn new(can_rx: R, host_tx: H, clock: C, indicator: &'a I, receive_timeout: Duration) -> Self {
        Self {
            can_rx,
            host_tx,
            clock,
            indicator,
            receive_timeout,
        }
    }

    /// Run one receive window and report its outcome on the host link.
    ///
    /// The capture timestamp is taken as soon as the receive call completes,
    /// before the indicator is touched or any formatting happens.
    pub async fn step(&mut self) -> Result<DecodeOutcome, DecoderError<H::Error>> {
        let mut line = Line::new();

        match self.can_rx.receive(self.receive_timeout).await {
            Ok(frame) => {
                let received = TimestampedFrame::new(frame, self.clock.now_micros());

                self.indicator.set_active(true);
                let written = self.emit_frame(&received, &mut line).await;
                self.indicator.set_active(false);
                written?;

                Ok(DecodeOutcome::Forwarded(received))
            }
            Err(ReceiveError::Timeout) => {
                write_quiet_line(&mut line).map_err(|_| DecoderError::LineOverflow)?;
                self.write(&line).await?;
                Ok(DecodeOutcome::Quiet)
            }
            Err(ReceiveError::Bus(err)) => {
                let status_code = err.status_code();
                #[cfg(feature = "defmt")]
                defmt::debug!("Bus receive failed, status {=u32:#x}", status_code);

                write_receive_failure_line(&mut line, status_code)
                    .map_err(|_| DecoderError::LineOverflow)?;
                self.write(&line).await?;
                Ok(DecodeOutcome::ReceiveFailed(status_code))
            }
        }
    }

    /// Loop forever. Iteration failures are logged and the next receive
    /// window starts immediately.
    pub async fn run(mut self) -> ! {
        loop {
            if let Err(_err) = self.step().await {
                #[cfg(feature = "defmt")]
                defmt::warn!("Decoder iteration failed: {:?}", defmt::Debug2Format(&_err));
            }
        }
    }

    async fn emit_frame(
        &mut self,
        received: &TimestampedFrame,
        line: &mut Line,
    ) -> Result<(), DecoderError<H::Error>> {
        write_frame_line(line, received).map_err(|_| DecoderError::LineOverflow)?;
        self.write(line).await
    }

    async fn write(&mut self, line: &Line) -> Result<(), DecoderError<H::Error>> {
        self.host_tx
            .write_all(line.as_bytes())
            .await
            .map_err(DecoderError::Host)
    }
}
