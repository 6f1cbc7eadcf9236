//! Outbound application events.
//!
//! The [`PlantMonitor`](super::service::PlantMonitor) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide what to do with them — log to serial,
//! capture in tests, forward upstream.

use crate::pin::PinAddress;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The monitor came up (carries whether a config was already live).
    Started { configured: bool },

    /// A configuration payload was applied wholesale.
    ConfigApplied { plant_count: usize },

    /// The config pull found no payload this duty cycle.
    ConfigFetchFailed,

    /// One probe sample, before thresholding.
    Sampled {
        plant: usize,
        value: u16,
        polarity: bool,
    },

    /// A plant crossed the moisture threshold and was watered.
    Watered { plant: usize, value: u16, tick: u32 },

    /// The remote service commanded an immediate watering.
    RemoteWater {
        forward: PinAddress,
        reverse: PinAddress,
        seconds: u32,
    },

    /// One plant's resolved watering history (`info` command).
    HistoryReport {
        plant: usize,
        timestamps: Vec<i64>,
    },
}
