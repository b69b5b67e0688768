//! Abstraction for the full-duplex serial link to the desktop application.
//! The link is split so that the decoder only writes and the encoder only reads.
use embassy_time::Duration;
use futures_util::Future;

/// Inbound half of the host link.
pub trait HostLinkRx {
    type Error: core::fmt::Debug;
    /// Read up to `buf.len()` bytes, returning after `timeout` with whatever
    /// arrived. `Ok(0)` means nothing was received in the window.
    fn read<'a>(
        &'a mut self,
        buf: &'a mut [u8],
        timeout: Duration,
    ) -> impl Future<Output = Result<usize, Self::Error>> + 'a;
    /// Discard every byte already buffered on the inbound side.
    fn flush_input<'a>(&'a mut self) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}

/// Outbound half of the host link.
pub trait HostLinkTx {
    type Error: core::fmt::Debug;
    /// Write every byte of `bytes`.
    fn write_all<'a>(
        &'a mut self,
        bytes: &'a [u8],
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}
