//! Hardware adapter — bridges real pins to the domain port traits.
//!
//! This is the only module that touches actual GPIO/ADC hardware.  A
//! [`PinAddress`] maps onto a flat GPIO number as `port * 16 + bit`.
//!
//! ## Sentinel contract
//!
//! Every operation on [`PinAddress::Unassigned`] is a no-op and reads
//! return 0/false — enforced here so the domain never pre-checks pins.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives pins via the C GPIO/ADC APIs.
//! On host/test: tracks pin state in-memory, with probe values
//! injectable through [`HardwareAdapter::sim_set_probe`].

use log::debug;

use crate::app::ports::{AdcPort, AdcReference, GpioPort};
use crate::pin::PinAddress;

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

fn gpio_num(pin: PinAddress) -> Option<i32> {
    match pin {
        PinAddress::Unassigned => None,
        PinAddress::Assigned { port, bit } => Some(i32::from(port.index()) * 16 + i32::from(bit)),
    }
}

/// ADC1 channel for a flat GPIO number.  On the S3, ADC1 muxes
/// GPIO1..=10 onto channels 0..=9; every other pin has no ADC1 path.
#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
fn adc1_channel(num: i32) -> Option<u32> {
    u32::try_from(num.checked_sub(1)?).ok().filter(|&ch| ch <= 9)
}

// ── On-target pin access ──────────────────────────────────────

#[cfg(target_os = "espidf")]
mod hw {
    pub fn set_direction(num: i32, output: bool) {
        // SAFETY: plain C calls with a validated GPIO number.
        unsafe {
            esp_idf_sys::gpio_set_direction(
                num,
                if output {
                    esp_idf_sys::gpio_mode_t_GPIO_MODE_OUTPUT
                } else {
                    esp_idf_sys::gpio_mode_t_GPIO_MODE_INPUT
                },
            );
        }
    }

    pub fn set_level(num: i32, high: bool) {
        // SAFETY: plain C call with a validated GPIO number.
        unsafe {
            esp_idf_sys::gpio_set_level(num, u32::from(high));
        }
    }

    pub fn get_level(num: i32) -> bool {
        // SAFETY: plain C call with a validated GPIO number.
        unsafe { esp_idf_sys::gpio_get_level(num) != 0 }
    }

    pub fn adc_read(channel: u32) -> u16 {
        // SAFETY: plain C call with a validated ADC1 channel.
        // The 12-bit raw reading is scaled to the 10-bit probe range.
        let raw = unsafe { esp_idf_sys::adc1_get_raw(channel as esp_idf_sys::adc1_channel_t) };
        if raw < 0 {
            0
        } else {
            (raw as u16) >> 2
        }
    }
}

// ── Adapter ───────────────────────────────────────────────────

/// Concrete GPIO + ADC facade.
#[derive(Debug, Default)]
pub struct HardwareAdapter {
    #[cfg(not(target_os = "espidf"))]
    levels: HashMap<i32, bool>,
    #[cfg(not(target_os = "espidf"))]
    probes: HashMap<i32, u16>,
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a probe reading for host runs.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_probe(&mut self, pin: PinAddress, raw: u16) {
        if let Some(num) = gpio_num(pin) {
            self.probes.insert(num, raw.min(1023));
        }
    }
}

impl GpioPort for HardwareAdapter {
    fn set_direction(&mut self, pin: PinAddress, output: bool) {
        let Some(num) = gpio_num(pin) else { return };
        debug!("gpio {num} direction {}", if output { "out" } else { "in" });

        #[cfg(target_os = "espidf")]
        hw::set_direction(num, output);
    }

    fn set_level(&mut self, pin: PinAddress, high: bool) {
        let Some(num) = gpio_num(pin) else { return };

        #[cfg(target_os = "espidf")]
        hw::set_level(num, high);

        #[cfg(not(target_os = "espidf"))]
        self.levels.insert(num, high);
    }

    fn get_level(&mut self, pin: PinAddress) -> bool {
        let Some(num) = gpio_num(pin) else {
            return false;
        };

        #[cfg(target_os = "espidf")]
        return hw::get_level(num);

        #[cfg(not(target_os = "espidf"))]
        return self.levels.get(&num).copied().unwrap_or(false);
    }
}

impl AdcPort for HardwareAdapter {
    fn set_reference(&mut self, reference: AdcReference) {
        debug!("adc reference: {reference:?}");
    }

    fn enable(&mut self, max_clock_hz: u32) {
        debug!("adc enabled, max clock {max_clock_hz} Hz");
    }

    fn read(&mut self, pin: PinAddress) -> u16 {
        let Some(num) = gpio_num(pin) else { return 0 };

        #[cfg(target_os = "espidf")]
        return match adc1_channel(num) {
            Some(channel) => hw::adc_read(channel),
            None => 0,
        };

        #[cfg(not(target_os = "espidf"))]
        return self.probes.get(&num).copied().unwrap_or(0);
    }
}
