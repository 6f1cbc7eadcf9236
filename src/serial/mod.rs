//! Serial command surface.
//!
//! Two commands, each terminated by `;`:
//! - `init <payload>` — rehydrate the device configuration
//! - `info` — dump every plant's resolved watering timestamps
//!
//! `!` cancels a partially typed line.  Bytes arrive in interrupt
//! context; the framer is a pure accumulator and the completed commands
//! cross into the foreground loop over a single-consumer queue, so the
//! interrupt path never touches the plant topology it used to race.

pub mod framer;
pub mod queue;

pub use framer::{LineFramer, SerialCommand, LINE_CAP};
pub use queue::{CommandConsumer, CommandProducer, CommandQueue};
