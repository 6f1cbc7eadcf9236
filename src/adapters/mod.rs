//! Concrete adapters behind the port traits.
//!
//! Only code in this tree touches the operating environment: sockets,
//! real pins, sleep primitives.  Hardware-specific pieces are gated on
//! `target_os = "espidf"`; the rest runs on the host too, which is what
//! keeps the domain core testable without a board on the desk.

pub mod log_sink;
pub mod net;
pub mod power;

pub mod hardware;
