//! Power management adapter.
//!
//! On ESP-IDF, [`SleepMode::PowerDown`] cycles use timed light sleep;
//! on the host (and for [`SleepMode::Idle`]) sleep cycles degrade to
//! plain thread sleeps, which is all the integration environment needs.
//! Peripheral gating is a no-op off-target.

use std::thread;
use std::time::Duration;

use log::debug;

use crate::app::ports::{PowerPort, SleepMode};

/// Seconds per sleep cycle, matching the watchdog-timed cycles the
/// original hardware used.
const SECS_PER_CYCLE: u64 = 1;

/// [`PowerPort`] over std sleeps plus cfg-gated light sleep.
#[derive(Debug, Default)]
pub struct StdPower;

impl PowerPort for StdPower {
    fn disable_all_peripherals(&mut self) {
        debug!("gating peripherals off");
    }

    fn enable_all_peripherals(&mut self) {
        debug!("gating peripherals on");
    }

    fn sleep_cycles(&mut self, cycles: u32, mode: SleepMode) {
        debug!("sleeping {cycles} cycles ({mode:?})");
        let secs = u64::from(cycles) * SECS_PER_CYCLE;

        #[cfg(target_os = "espidf")]
        if mode == SleepMode::PowerDown {
            // SAFETY: plain C calls; light sleep resumes execution here.
            unsafe {
                esp_idf_sys::esp_sleep_enable_timer_wakeup(secs * 1_000_000);
                esp_idf_sys::esp_light_sleep_start();
            }
            return;
        }

        thread::sleep(Duration::from_secs(secs));
    }
}
