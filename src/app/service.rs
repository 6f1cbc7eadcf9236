//! Plant monitor — the duty-cycled sensing/actuation core.
//!
//! One [`PlantMonitor`] owns every piece of mutable device state: the
//! live [`DeviceConfig`], the monotonic tick counter, and the probe
//! polarity flag.  Earlier firmware kept these in globals shared with
//! the serial interrupt and bracketed destructive updates with
//! interrupt disable/enable; here the interrupt side only enqueues
//! framed commands and the foreground loop applies them between
//! cycles, so a reconfigure can no longer free a plant array mid-walk.
//!
//! ```text
//!  GpioPort/AdcPort ──▶ ┌──────────────────┐ ──▶ EventSink
//!                       │   PlantMonitor    │
//!  SerialCommand ──────▶│ tick · polarity   │──▶ StreamPort (HTTP)
//!                       └──────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::{DeviceConfig, NetConfig, WateringRecord, ADC_MAX_CLOCK_HZ, MOISTURE_MIDPOINT};
use crate::http::{HttpClient, Method, StreamPort};
use crate::proto::WaterCommand;
use crate::serial::SerialCommand;

use super::events::AppEvent;
use super::ports::{AdcPort, AdcReference, EventSink, GpioPort, PowerPort, SleepMode};

/// The application core.  Construct once at boot; the duty loop calls
/// [`duty_cycle`](Self::duty_cycle) forever.
pub struct PlantMonitor {
    config: DeviceConfig,
    net: NetConfig,
    /// Monotonic duty-cycle counter; watering records are stamped with it.
    tick: u32,
    /// Probe drive direction for the current cycle.  Alternating the
    /// direction each cycle cancels electrolytic drift in the probes.
    polarity: bool,
}

impl PlantMonitor {
    pub fn new(net: NetConfig) -> Self {
        Self {
            config: DeviceConfig::default(),
            net,
            tick: 0,
            polarity: true,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn polarity(&self) -> bool {
        self.polarity
    }

    pub fn is_configured(&self) -> bool {
        !self.config.is_empty()
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        info!("plant monitor started (configured: {})", self.is_configured());
        sink.emit(&AppEvent::Started {
            configured: self.is_configured(),
        });
    }

    // ── Configuration ─────────────────────────────────────────

    /// Apply a configuration payload, replacing the previous device
    /// config wholesale.  The old plant vector — watering histories
    /// included — is dropped here.
    pub fn reconfigure(&mut self, payload: &str, sink: &mut impl EventSink) {
        self.config = DeviceConfig::from_wire(payload);
        info!(
            "configuration applied: {} plants, interval {}s",
            self.config.plants.len(),
            self.config.delay_interval
        );
        sink.emit(&AppEvent::ConfigApplied {
            plant_count: self.config.plants.len(),
        });
    }

    /// Pull the configuration payload from the remote service.
    /// Absent result ⇒ untouched config, retried next duty cycle.
    pub fn fetch_config(
        &mut self,
        stream: &mut impl StreamPort,
        sink: &mut impl EventSink,
    ) -> bool {
        let uri = self.net.config_uri();
        let body = HttpClient::new(
            stream,
            &self.net.host,
            self.net.port,
            &self.net.api_key,
            self.net.timeout_secs,
        )
        .request(Method::Get, &uri, None, None);

        match body {
            Some(bytes) => match String::from_utf8(bytes) {
                Ok(payload) => {
                    self.reconfigure(&payload, sink);
                    true
                }
                Err(_) => {
                    warn!("config payload was not valid UTF-8, ignoring");
                    sink.emit(&AppEvent::ConfigFetchFailed);
                    false
                }
            },
            None => {
                debug!("config fetch yielded no payload");
                sink.emit(&AppEvent::ConfigFetchFailed);
                false
            }
        }
    }

    // ── Serial command handling ───────────────────────────────

    /// Apply one command drained from the serial queue.
    pub fn handle_command(&mut self, command: SerialCommand, sink: &mut impl EventSink) {
        match command {
            SerialCommand::Reconfigure(payload) => self.reconfigure(&payload, sink),
            SerialCommand::Report => self.report_history(sink),
        }
    }

    /// Emit every plant's watering history, ticks resolved to absolute
    /// timestamps against the schedule base.
    fn report_history(&self, sink: &mut impl EventSink) {
        for (idx, plant) in self.config.plants.iter().enumerate() {
            let timestamps = plant
                .records
                .iter()
                .map(|record| record.resolve(&self.config))
                .collect();
            sink.emit(&AppEvent::HistoryReport {
                plant: idx,
                timestamps,
            });
        }
    }

    // ── Duty cycle ────────────────────────────────────────────

    /// One foreground iteration: pull config when none is live, then
    /// run the monitor cycle.  The binary wraps this with the
    /// power-down sleep.
    pub fn duty_cycle(
        &mut self,
        hw: &mut (impl GpioPort + AdcPort + PowerPort),
        stream: &mut impl StreamPort,
        sink: &mut impl EventSink,
    ) {
        if !self.is_configured() {
            let _ = self.fetch_config(stream, sink);
        }
        self.cycle(hw, stream, sink);
    }

    /// One sense/act/report pass over the plant list.
    pub fn cycle(
        &mut self,
        hw: &mut (impl GpioPort + AdcPort + PowerPort),
        stream: &mut impl StreamPort,
        sink: &mut impl EventSink,
    ) {
        self.tick = self.tick.wrapping_add(1);
        let polarity = self.polarity;

        let led = self.config.led;
        hw.set_direction(led, true);
        hw.set_level(led, true);

        hw.set_reference(AdcReference::SupplyRail);
        hw.enable(ADC_MAX_CLOCK_HZ);

        for idx in 0..self.config.plants.len() {
            let pins = self.config.plants[idx].config;

            // A facade read of an unassigned probe returns 0, which
            // polarity-true would read as bone dry.  Skip the channel.
            if !pins.probe.is_assigned() {
                debug!("plant {idx} has no probe, skipping");
                continue;
            }

            hw.set_direction(pins.forward, true);
            hw.set_direction(pins.reverse, true);

            let (high, low) = if polarity {
                (pins.forward, pins.reverse)
            } else {
                (pins.reverse, pins.forward)
            };
            hw.set_level(high, true);
            hw.set_level(low, false);

            let value = hw.read(pins.probe);
            sink.emit(&AppEvent::Sampled {
                plant: idx,
                value,
                polarity,
            });

            let triggered = if polarity {
                value < MOISTURE_MIDPOINT
            } else {
                value > MOISTURE_MIDPOINT
            };

            if triggered {
                self.config.plants[idx]
                    .records
                    .push(WateringRecord { tick: self.tick });
                info!("watering plant {idx} (sample {value}, tick {})", self.tick);
                sink.emit(&AppEvent::Watered {
                    plant: idx,
                    value,
                    tick: self.tick,
                });

                if let Some(body) = self.report_telemetry(stream, idx, value) {
                    if !body.is_empty() {
                        let text = String::from_utf8_lossy(&body);
                        let command = WaterCommand::from_wire(&text);
                        if command.is_actionable() {
                            self.apply_water_command(hw, command, sink);
                        }
                    }
                }
            }
        }

        self.polarity = !polarity;

        // De-assert every drive pin before the power-down sleep.
        for plant in &self.config.plants {
            hw.set_level(plant.config.forward, false);
            hw.set_level(plant.config.reverse, false);
        }
        hw.set_level(led, false);
    }

    // ── Telemetry ─────────────────────────────────────────────

    /// POST one watering report.  A present response body may carry a
    /// remote watering command; absence is not an error.
    fn report_telemetry(
        &self,
        stream: &mut impl StreamPort,
        plant: usize,
        value: u16,
    ) -> Option<Vec<u8>> {
        let uri = self.net.telemetry_uri();
        let body = format!("i={plant}&v={value}&f={}", u8::from(self.polarity));
        HttpClient::new(
            stream,
            &self.net.host,
            self.net.port,
            &self.net.api_key,
            self.net.timeout_secs,
        )
        .request(
            Method::Post,
            &uri,
            Some("application/x-www-form-urlencoded"),
            Some(body.as_bytes()),
        )
    }

    /// Drive the override pins for the commanded duration.
    fn apply_water_command(
        &self,
        hw: &mut (impl GpioPort + PowerPort),
        command: WaterCommand,
        sink: &mut impl EventSink,
    ) {
        info!(
            "remote watering: {} / {} for {}s",
            command.forward, command.reverse, command.seconds
        );
        sink.emit(&AppEvent::RemoteWater {
            forward: command.forward,
            reverse: command.reverse,
            seconds: command.seconds,
        });

        hw.set_direction(command.forward, true);
        hw.set_direction(command.reverse, true);
        hw.set_level(command.forward, true);
        hw.set_level(command.reverse, false);

        hw.sleep_cycles(command.seconds, SleepMode::Idle);

        hw.set_level(command.forward, false);
        hw.set_level(command.reverse, false);
    }
}
