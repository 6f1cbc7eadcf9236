//! Application core — the hexagonal middle of the controller.
//!
//! [`service::PlantMonitor`] owns every piece of mutable device state
//! (configuration, tick counter, polarity flag) and consumes the port
//! traits in [`ports`]; adapters on the outside implement them.

pub mod events;
pub mod ports;
pub mod service;
