//! Pin addressing — text ⇄ typed (port, bit) conversion.
//!
//! Wire payloads and serial commands name pins as `"<PortLetter><bit>"`
//! (e.g. `"D7"`, `"C0"`) or the literal `"none"` for an unassigned slot.
//! Earlier firmware packed these into a single byte and masked both
//! halves to 4 bits, so an out-of-range letter or bit index wrapped
//! silently onto a different pin.  The parser here rejects such input
//! with a descriptive error instead.
//!
//! Every driver references this module rather than hand-decoding pin
//! text; the facade adapters treat [`PinAddress::Unassigned`] as a
//! no-op for all GPIO/ADC operations.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Highest bit index a port exposes on the wire (`"<letter>15"`).
pub const MAX_BIT: u8 = 15;

/// Closed set of GPIO port letters the board family exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl Port {
    /// Zero-based index relative to port letter 'A'.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The port's letter as an ASCII character.
    pub const fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'H' => Some(Self::H),
            _ => None,
        }
    }
}

/// A single GPIO/ADC pin slot, or the "none" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PinAddress {
    /// No pin assigned — every hardware operation on this is a no-op.
    #[default]
    Unassigned,
    /// A concrete (port, bit) pair.
    Assigned { port: Port, bit: u8 },
}

impl PinAddress {
    /// Construct an assigned address, rejecting out-of-range bit indices.
    pub fn assigned(port: Port, bit: u8) -> Result<Self, PinParseError> {
        if bit > MAX_BIT {
            return Err(PinParseError::BitOutOfRange(bit));
        }
        Ok(Self::Assigned { port, bit })
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned { .. })
    }
}

impl fmt::Display for PinAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => write!(f, "none"),
            Self::Assigned { port, bit } => write!(f, "{}{}", port.letter(), bit),
        }
    }
}

impl FromStr for PinAddress {
    type Err = PinParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self::Unassigned);
        }

        let mut chars = s.chars();
        let letter = chars.next().ok_or(PinParseError::Empty)?;
        let port = Port::from_letter(letter).ok_or(PinParseError::UnknownPort(letter))?;

        let digits = chars.as_str();
        let bit: u8 = digits.parse().map_err(|_| PinParseError::BadBitIndex)?;

        Self::assigned(port, bit)
    }
}

/// Errors from parsing a pin address string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinParseError {
    /// The input was empty.
    Empty,
    /// The port letter is outside the supported set.
    UnknownPort(char),
    /// The bit index was missing or not a decimal number.
    BadBitIndex,
    /// The bit index exceeds [`MAX_BIT`].
    BitOutOfRange(u8),
}

impl fmt::Display for PinParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty pin name"),
            Self::UnknownPort(c) => write!(f, "unknown port letter '{c}'"),
            Self::BadBitIndex => write!(f, "bit index missing or not a number"),
            Self::BitOutOfRange(bit) => {
                write!(f, "bit index {bit} out of range (max {MAX_BIT})")
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_sentinel_any_case() {
        for text in ["none", "NONE", "None", "nOnE"] {
            assert_eq!(text.parse::<PinAddress>().unwrap(), PinAddress::Unassigned);
        }
    }

    #[test]
    fn round_trip_all_ports_and_bits() {
        for port in [
            Port::A,
            Port::B,
            Port::C,
            Port::D,
            Port::E,
            Port::F,
            Port::G,
            Port::H,
        ] {
            for bit in 0..=MAX_BIT {
                let addr = PinAddress::assigned(port, bit).unwrap();
                let text = addr.to_string();
                assert_eq!(text.parse::<PinAddress>().unwrap(), addr);
            }
        }
    }

    #[test]
    fn sentinel_round_trips_through_display() {
        assert_eq!(PinAddress::Unassigned.to_string(), "none");
        assert_eq!("none".parse::<PinAddress>().unwrap().to_string(), "none");
    }

    #[test]
    fn lowercase_letter_accepted() {
        assert_eq!(
            "d7".parse::<PinAddress>().unwrap(),
            PinAddress::Assigned {
                port: Port::D,
                bit: 7
            }
        );
    }

    #[test]
    fn out_of_range_rejected_not_wrapped() {
        // The legacy packed codec masked these to 4 bits; here they fail.
        assert_eq!(
            "Z3".parse::<PinAddress>(),
            Err(PinParseError::UnknownPort('Z'))
        );
        assert_eq!(
            "D16".parse::<PinAddress>(),
            Err(PinParseError::BitOutOfRange(16))
        );
    }

    #[test]
    fn malformed_inputs_rejected() {
        assert_eq!("".parse::<PinAddress>(), Err(PinParseError::Empty));
        assert_eq!("D".parse::<PinAddress>(), Err(PinParseError::BadBitIndex));
        assert_eq!("Dx".parse::<PinAddress>(), Err(PinParseError::BadBitIndex));
        assert_eq!(
            "7D".parse::<PinAddress>(),
            Err(PinParseError::UnknownPort('7'))
        );
    }
}
