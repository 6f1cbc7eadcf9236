//! PlantGuard firmware library.
//!
//! Battery/solar irrigation controller core: per-plant soil-moisture
//! sensing with polarity-alternating probes, forward/reverse valve
//! drive, and remote configuration/telemetry over an HTTP byte stream.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod http;
pub mod pin;
pub mod proto;
pub mod serial;

pub mod adapters;
