//! Startup collaborator installing and starting the bus controller.
use crate::protocol::bit_rate::BitRatePreset;
use futures_util::Future;

/// Applies the negotiated preset to the bus controller.
///
/// Called exactly once. An error is fatal: the bridge does not start.
pub trait BusConfigurator {
    type Error: core::fmt::Debug;
    fn configure<'a>(
        &'a mut self,
        preset: BitRatePreset,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}
