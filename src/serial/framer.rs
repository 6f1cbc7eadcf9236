//! Interrupt-context line framer.
//!
//! One state: accumulating.  Per byte the ISR adapter echoes the byte
//! back to the operator, then calls [`LineFramer::feed`]; the framer
//! itself never blocks, never allocates, and never toggles interrupts.
//! A full buffer silently discards the in-progress line — the operator
//! sees only the already-echoed bytes, which matches the original
//! firmware's behaviour.

use heapless::{String, Vec};

/// Fixed line capacity.  A config payload for the full 32-channel
/// limit runs to roughly 430 bytes with the widest field spellings, so
/// this fits it with room to spare.
pub const LINE_CAP: usize = 512;

/// Line terminator: dispatch.
const TERMINATOR: u8 = b';';
/// Cancel byte: reset without dispatch.
const CANCEL: u8 = b'!';

/// A parsed serial command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialCommand {
    /// `init <payload>` — run the configuration protocol on the payload.
    Reconfigure(String<LINE_CAP>),
    /// `info` — report resolved watering timestamps for every plant.
    Report,
}

/// Byte accumulator for the serial command surface.
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: Vec<u8, LINE_CAP>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one received byte.  Returns a command when `;` terminates a
    /// line that matches the command table; the caller enqueues it for
    /// the foreground loop.
    pub fn feed(&mut self, byte: u8) -> Option<SerialCommand> {
        match byte {
            CANCEL => {
                self.buf.clear();
                None
            }
            TERMINATOR => {
                let command = parse_line(&self.buf);
                self.buf.clear();
                command
            }
            other => {
                if self.buf.push(other).is_err() {
                    // Overflow: drop the whole in-progress line, no signal.
                    self.buf.clear();
                }
                None
            }
        }
    }
}

fn parse_line(line: &[u8]) -> Option<SerialCommand> {
    let text = core::str::from_utf8(line).ok()?;

    const INIT_PREFIX: &str = "init ";
    if text.len() >= INIT_PREFIX.len()
        && text[..INIT_PREFIX.len()].eq_ignore_ascii_case(INIT_PREFIX)
    {
        let payload = &text[INIT_PREFIX.len()..];
        // Payload always fits: it came out of the same fixed buffer.
        return Some(SerialCommand::Reconfigure(String::try_from(payload).ok()?));
    }

    if text.eq_ignore_ascii_case("info") {
        return Some(SerialCommand::Report);
    }

    None
}

// ── Tests ────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(framer: &mut LineFramer, bytes: &[u8]) -> std::vec::Vec<SerialCommand> {
        bytes.iter().filter_map(|&b| framer.feed(b)).collect()
    }

    #[test]
    fn info_dispatches_exactly_one_report() {
        let mut framer = LineFramer::new();
        let commands = feed_all(&mut framer, b"info;");
        assert_eq!(commands, vec![SerialCommand::Report]);
    }

    #[test]
    fn init_carries_payload_remainder() {
        let mut framer = LineFramer::new();
        let commands = feed_all(&mut framer, b"init 1,60,D7,1,D5,D6,C0;");
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            SerialCommand::Reconfigure(payload) => {
                assert_eq!(payload.as_str(), "1,60,D7,1,D5,D6,C0");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn widest_full_channel_config_line_fits() {
        use crate::config::MAX_PLANTS;

        let mut payload = format!("-9223372036854775808,4294967295,A15,{MAX_PLANTS}");
        for _ in 0..MAX_PLANTS {
            payload.push_str(",A15,A15,A15");
        }
        let line = format!("init {payload};");
        assert!(line.len() <= LINE_CAP, "worst-case init line must fit");

        let mut framer = LineFramer::new();
        let commands = feed_all(&mut framer, line.as_bytes());
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            SerialCommand::Reconfigure(got) => assert_eq!(got.as_str(), payload),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn commands_match_case_insensitively() {
        let mut framer = LineFramer::new();
        assert_eq!(feed_all(&mut framer, b"INFO;"), vec![SerialCommand::Report]);
        assert_eq!(feed_all(&mut framer, b"Init x;").len(), 1);
    }

    #[test]
    fn cancel_resets_without_dispatch() {
        let mut framer = LineFramer::new();
        assert!(feed_all(&mut framer, b"inf!").is_empty());
        // The cancelled prefix must not bleed into the next line.
        assert_eq!(feed_all(&mut framer, b"info;"), vec![SerialCommand::Report]);
    }

    #[test]
    fn overflow_discards_line_without_dispatch() {
        let mut framer = LineFramer::new();
        let flood = vec![b'x'; LINE_CAP + 40];
        assert!(feed_all(&mut framer, &flood).is_empty());
        assert!(feed_all(&mut framer, b";").is_empty());
    }

    #[test]
    fn unknown_line_is_dropped() {
        let mut framer = LineFramer::new();
        assert!(feed_all(&mut framer, b"reboot;").is_empty());
    }

    #[test]
    fn back_to_back_commands() {
        let mut framer = LineFramer::new();
        let commands = feed_all(&mut framer, b"info;info;");
        assert_eq!(commands.len(), 2);
    }
}
