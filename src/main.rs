//! PlantGuard firmware — main entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                   │
//! │                                                           │
//! │  HardwareAdapter   TcpTransport   LogEventSink  StdPower  │
//! │  (Gpio+Adc)        (StreamPort)   (EventSink)   (Power)   │
//! │                                                           │
//! │  ────────────── Port Trait Boundary ──────────────        │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────┐      │
//! │  │          PlantMonitor (pure logic)              │      │
//! │  │  config · tick · polarity · watering records    │      │
//! │  └─────────────────────────────────────────────────┘      │
//! │                                                           │
//! │  Serial RX thread ──▶ LineFramer ──▶ SPSC queue ──▶ loop  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The duty loop: drain serial commands → configure/monitor → gated
//! power-down sleep.  The serial receive path only frames bytes and
//! enqueues completed commands; all state lives in the foreground.

#![deny(unused_must_use)]

use std::io::{Read, Write};
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use plantguard::adapters::hardware::HardwareAdapter;
use plantguard::adapters::log_sink::LogEventSink;
use plantguard::adapters::net::TcpTransport;
use plantguard::adapters::power::StdPower;
use plantguard::app::ports::{PowerPort, SleepMode};
use plantguard::app::service::PlantMonitor;
use plantguard::config::{NetConfig, SLEEP_CYCLES_BETWEEN_DUTY};
use plantguard::serial::queue::{self, CommandProducer, CommandQueue};
use plantguard::serial::LineFramer;

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("PlantGuard v{}", env!("CARGO_PKG_VERSION"));

    let net = NetConfig::default();
    let mut monitor = PlantMonitor::new(net);
    let mut hw = HardwareAdapter::new();
    let mut transport = TcpTransport;
    let mut power = StdPower;
    let mut sink = LogEventSink;

    // The queue outlives both endpoints; the producer moves into the
    // serial RX thread, the consumer stays with the duty loop.
    let rx_queue: &'static mut CommandQueue = Box::leak(Box::new(CommandQueue::new()));
    let (producer, mut consumer) = rx_queue.split();
    spawn_serial_rx(producer);

    monitor.start(&mut sink);

    loop {
        queue::drain(&mut consumer, |command| {
            monitor.handle_command(command, &mut sink);
        });

        monitor.duty_cycle(&mut hw, &mut transport, &mut sink);

        power.disable_all_peripherals();
        power.sleep_cycles(SLEEP_CYCLES_BETWEEN_DUTY, SleepMode::PowerDown);
        power.enable_all_peripherals();
    }
}

/// Console-UART receive path: echo each byte, frame lines, enqueue
/// completed commands for the foreground loop.
fn spawn_serial_rx(mut producer: CommandProducer<'static>) {
    std::thread::spawn(move || {
        let mut framer = LineFramer::new();
        let mut stdin = std::io::stdin();
        let mut byte = [0u8; 1];

        loop {
            match stdin.read(&mut byte) {
                Ok(1) => {
                    let mut stdout = std::io::stdout();
                    let _ = stdout.write_all(&byte);
                    let _ = stdout.flush();

                    if let Some(command) = framer.feed(byte[0]) {
                        if !queue::enqueue(&mut producer, command) {
                            warn!("command queue full, dropping command");
                        }
                    }
                }
                _ => std::thread::sleep(Duration::from_millis(20)),
            }
        }
    });
}
