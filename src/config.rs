//! Device configuration and plant topology.
//!
//! [`DeviceConfig`] is the whole-device state pushed or pulled from the
//! remote service: the schedule base, the status LED pin, and one
//! [`Plant`] per irrigation channel.  It is replaced wholesale on every
//! successful configuration event — never partially updated — which also
//! drops every plant's watering history.

use serde::{Deserialize, Serialize};

use crate::pin::PinAddress;

/// 10-bit ADC midpoint; the moisture trigger threshold.
pub const MOISTURE_MIDPOINT: u16 = 512;

/// Maximum ADC clock the moisture probes tolerate.
pub const ADC_MAX_CLOCK_HZ: u32 = 200_000;

/// Power-down sleep cycles between duty cycles.
pub const SLEEP_CYCLES_BETWEEN_DUTY: u32 = 8;

/// Upper bound on irrigation channels; a wire payload claiming more is
/// clamped rather than trusted with the allocation.
pub const MAX_PLANTS: usize = 32;

/// One watering event, timestamped by duty-cycle tick.
///
/// The record stays a bare tick; it is resolved to an absolute
/// timestamp lazily against the schedule base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WateringRecord {
    pub tick: u32,
}

impl WateringRecord {
    /// Absolute timestamp: `timestamp0 + tick * delay_interval`.
    ///
    /// Both operands come off the wire unbounded, so the arithmetic
    /// saturates instead of overflowing.
    pub fn resolve(&self, config: &DeviceConfig) -> i64 {
        let offset = i64::from(self.tick).saturating_mul(i64::from(config.delay_interval));
        config.timestamp0.saturating_add(offset)
    }
}

/// Pin assignments for one irrigation channel: a bidirectional valve or
/// pump drive plus its moisture probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlantConfig {
    pub forward: PinAddress,
    pub reverse: PinAddress,
    pub probe: PinAddress,
}

/// A monitored plant: channel pins plus its append-only watering history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plant {
    pub config: PlantConfig,
    pub records: Vec<WateringRecord>,
}

impl Plant {
    pub fn new(config: PlantConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }
}

/// Whole-device configuration.  Starts empty at boot; rehydrated by the
/// configuration protocol (`proto` module).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Absolute timestamp of tick zero (seconds).
    pub timestamp0: i64,
    /// Seconds per duty-cycle tick.
    pub delay_interval: u32,
    /// Status LED, lit while a duty cycle runs.
    pub led: PinAddress,
    pub plants: Vec<Plant>,
}

impl DeviceConfig {
    /// An unconfigured device has no plants to monitor.
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

/// Remote-service endpoint parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetConfig {
    pub host: String,
    pub port: u16,
    /// Numeric device identifier, templated into request URIs.
    pub device_id: u32,
    /// Pre-shared key sent as the `X-ApiKey` header.
    pub api_key: String,
    /// Stream open timeout (seconds).
    pub timeout_secs: u8,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            host: "garden.example.net".into(),
            port: 80,
            device_id: 1,
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl NetConfig {
    /// URI for pulling the device configuration payload.
    pub fn config_uri(&self) -> String {
        format!("/api/devices/{}/config", self.device_id)
    }

    /// URI for posting a telemetry report.
    pub fn telemetry_uri(&self) -> String {
        format!("/api/devices/{}/telemetry", self.device_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::Port;

    #[test]
    fn record_resolves_against_schedule_base() {
        let config = DeviceConfig {
            timestamp0: 1_000,
            delay_interval: 60,
            ..Default::default()
        };
        let record = WateringRecord { tick: 3 };
        assert_eq!(record.resolve(&config), 1_180);
    }

    #[test]
    fn resolve_saturates_on_extreme_schedule_values() {
        let config = DeviceConfig {
            timestamp0: i64::MAX,
            delay_interval: 60,
            ..Default::default()
        };
        assert_eq!(WateringRecord { tick: 1 }.resolve(&config), i64::MAX);

        let config = DeviceConfig {
            timestamp0: i64::MIN,
            delay_interval: u32::MAX,
            ..Default::default()
        };
        assert_eq!(WateringRecord { tick: 0 }.resolve(&config), i64::MIN);
        // Huge positive offset against a minimal base stays finite.
        let _ = WateringRecord { tick: u32::MAX }.resolve(&config);
    }

    #[test]
    fn boot_config_is_empty() {
        assert!(DeviceConfig::default().is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let config = DeviceConfig {
            timestamp0: 42,
            delay_interval: 60,
            led: PinAddress::Assigned {
                port: Port::D,
                bit: 7,
            },
            plants: vec![Plant::new(PlantConfig {
                forward: PinAddress::Assigned {
                    port: Port::D,
                    bit: 5,
                },
                reverse: PinAddress::Assigned {
                    port: Port::D,
                    bit: 6,
                },
                probe: PinAddress::Assigned {
                    port: Port::C,
                    bit: 0,
                },
            })],
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: DeviceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timestamp0, config.timestamp0);
        assert_eq!(back.plants.len(), 1);
        assert_eq!(back.plants[0].config, config.plants[0].config);
    }

    #[test]
    fn uris_carry_device_id() {
        let net = NetConfig {
            device_id: 7,
            ..Default::default()
        };
        assert_eq!(net.config_uri(), "/api/devices/7/config");
        assert_eq!(net.telemetry_uri(), "/api/devices/7/telemetry");
    }
}
