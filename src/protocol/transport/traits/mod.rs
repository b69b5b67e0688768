//! Abstraction traits for the peripherals the bridge drives: the bus
//! controller halves, the host link halves, the capture clock, the activity
//! output, and the startup bus configurator.
pub mod activity_indicator;
pub mod bridge_clock;
pub mod bus_configurator;
pub mod can_bus;
pub mod host_link;
