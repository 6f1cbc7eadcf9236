//! Remote-configuration wire grammar.
//!
//! The service speaks a strict positional, comma-delimited text format
//! with no escaping, length prefix, or version tag:
//!
//! ```text
//! timestamp,delayInterval,ledPin,plantCount,(fwdPin,revPin,adcPin){plantCount}
//! ```
//!
//! The final field of a payload may omit the trailing delimiter.  A
//! delimiter missing anywhere *before* the last field leaves every
//! subsequent field unpopulated with no error raised — a long-standing
//! protocol behaviour that peers rely on, so it is preserved here
//! rather than tightened.  Availability wins over completeness: a field
//! that fails to parse degrades to its default and is logged.
//!
//! The telemetry response reuses the tail of this grammar
//! (`fwdPin,revPin,wateringSeconds`) to command an immediate watering —
//! see [`WaterCommand`].

use core::str::FromStr;

use log::warn;

use crate::config::{DeviceConfig, Plant, PlantConfig, MAX_PLANTS};
use crate::pin::PinAddress;

/// Splits a payload at delimiters, one field per call.
///
/// Yields `None` once the input is exhausted; the last field may lack a
/// trailing delimiter.
struct FieldCursor<'a> {
    rest: Option<&'a str>,
}

impl<'a> FieldCursor<'a> {
    fn new(payload: &'a str) -> Self {
        Self {
            rest: Some(payload),
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        match rest.find(',') {
            Some(idx) => {
                self.rest = Some(&rest[idx + 1..]);
                Some(&rest[..idx])
            }
            None => {
                self.rest = None;
                if rest.is_empty() { None } else { Some(rest) }
            }
        }
    }

    /// Parse the next field, or fall back to `T::default()` when the
    /// field is absent or malformed (missing-delimiter hazard).
    fn field<T>(&mut self, what: &str) -> T
    where
        T: FromStr + Default,
        T::Err: core::fmt::Display,
    {
        match self.next() {
            None => T::default(),
            Some(text) => text.parse().unwrap_or_else(|e| {
                warn!("config field '{what}' unparseable ({e}), using default");
                T::default()
            }),
        }
    }
}

impl DeviceConfig {
    /// Rehydrate a full device configuration from a wire payload.
    ///
    /// The returned plant vector is sized exactly to the payload's
    /// `plantCount` (empty when zero, clamped to [`MAX_PLANTS`]);
    /// plants whose pin fields ran past
    /// the end of the payload keep [`PinAddress::Unassigned`] slots.
    /// Watering histories always start empty — the caller replaces the
    /// previous configuration wholesale, dropping old histories with it.
    pub fn from_wire(payload: &str) -> Self {
        let mut cursor = FieldCursor::new(payload.trim());

        let timestamp0: i64 = cursor.field("timestamp");
        let delay_interval: u32 = cursor.field("delayInterval");
        let led: PinAddress = cursor.field("ledPin");
        let mut plant_count: usize = cursor.field("plantCount");
        if plant_count > MAX_PLANTS {
            warn!("plant count {plant_count} exceeds the {MAX_PLANTS}-channel limit, clamping");
            plant_count = MAX_PLANTS;
        }

        let mut plants = Vec::with_capacity(plant_count);
        for _ in 0..plant_count {
            plants.push(Plant::new(PlantConfig {
                forward: cursor.field("forwardPin"),
                reverse: cursor.field("reversePin"),
                probe: cursor.field("adcPin"),
            }));
        }

        Self {
            timestamp0,
            delay_interval,
            led,
            plants,
        }
    }

    /// Serialise back through the wire grammar (no trailing delimiter).
    pub fn to_wire(&self) -> String {
        let mut out = format!(
            "{},{},{},{}",
            self.timestamp0,
            self.delay_interval,
            self.led,
            self.plants.len()
        );
        for plant in &self.plants {
            let p = &plant.config;
            out.push_str(&format!(",{},{},{}", p.forward, p.reverse, p.probe));
        }
        out
    }
}

/// An immediate watering action commanded by the remote service in a
/// telemetry response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WaterCommand {
    pub forward: PinAddress,
    pub reverse: PinAddress,
    pub seconds: u32,
}

impl WaterCommand {
    /// Parse the telemetry-response tail.  Absent or malformed fields
    /// degrade to defaults, which makes the command a no-op.
    pub fn from_wire(payload: &str) -> Self {
        let mut cursor = FieldCursor::new(payload.trim());
        Self {
            forward: cursor.field("forwardPinOverride"),
            reverse: cursor.field("reversePinOverride"),
            seconds: cursor.field("wateringSeconds"),
        }
    }

    /// A command with no drive pins or zero duration does nothing.
    pub fn is_actionable(&self) -> bool {
        self.seconds > 0 && self.forward.is_assigned() && self.reverse.is_assigned()
    }
}

// ── Tests ────────────────────────────────────────────────────
