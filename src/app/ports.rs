//! Port traits — the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PlantMonitor (domain)
//! ```
//!
//! Driven adapters (GPIO, ADC, power, event sinks) implement these
//! traits.  The [`PlantMonitor`](super::service::PlantMonitor) consumes
//! them via generics, so the domain core never touches hardware
//! directly and every test runs against mocks.
//!
//! ## Sentinel contract
//!
//! Every operation taking a [`PinAddress`] MUST be a no-op for
//! [`PinAddress::Unassigned`]; [`AdcPort::read`] returns 0 for it.
//! The domain never needs to pre-check a pin before acting on it.

use crate::pin::PinAddress;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain → pins)
// ───────────────────────────────────────────────────────────────

/// Digital pin control.
pub trait GpioPort {
    /// Configure a pin as output (`true`) or input (`false`).
    fn set_direction(&mut self, pin: PinAddress, output: bool);

    /// Drive an output pin high or low.
    fn set_level(&mut self, pin: PinAddress, high: bool);

    /// Sample a pin's level.  `false` for the sentinel.
    fn get_level(&mut self, pin: PinAddress) -> bool;
}

// ───────────────────────────────────────────────────────────────
// ADC port (driven adapter: probes → domain)
// ───────────────────────────────────────────────────────────────

/// Analog reference selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcReference {
    /// Supply-rail reference (the probe dividers are ratiometric).
    SupplyRail,
    /// Internal bandgap reference.
    Internal,
}

/// Moisture-probe sampling.  Readings are 10-bit (0..=1023).
pub trait AdcPort {
    fn set_reference(&mut self, reference: AdcReference);

    /// Enable the converter, clocked no faster than `max_clock_hz`.
    fn enable(&mut self, max_clock_hz: u32);

    /// Sample a probe pin.  0 for the sentinel.
    fn read(&mut self, pin: PinAddress) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Power port (driven adapter: domain → sleep/peripheral gating)
// ───────────────────────────────────────────────────────────────

/// How deep a sleep cycle goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepMode {
    /// CPU halted, peripherals live — used for timed watering waits.
    Idle,
    /// Everything gated off — the inter-duty-cycle sleep.
    PowerDown,
}

/// Power management between and within duty cycles.
pub trait PowerPort {
    fn disable_all_peripherals(&mut self);
    fn enable_all_peripherals(&mut self);

    /// Block for `cycles` sleep cycles (~1 s each) in the given mode.
    fn sleep_cycles(&mut self, cycles: u32, mode: SleepMode);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry fan-out)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, test
/// capture, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
