//! Property tests for the text surfaces: pin addressing, the config
//! wire grammar, and the serial line framer.  Exercised on the host
//! only; the on-target build has no proptest.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;

use plantguard::config::DeviceConfig;
use plantguard::pin::{PinAddress, Port, MAX_BIT};
use plantguard::proto::WaterCommand;
use plantguard::serial::LineFramer;

const PORTS: [Port; 8] = [
    Port::A,
    Port::B,
    Port::C,
    Port::D,
    Port::E,
    Port::F,
    Port::G,
    Port::H,
];

fn any_pin() -> impl Strategy<Value = PinAddress> {
    prop_oneof![
        Just(PinAddress::Unassigned),
        (prop::sample::select(PORTS.as_slice()), 0..=MAX_BIT)
            .prop_map(|(port, bit)| PinAddress::Assigned { port, bit }),
    ]
}

proptest! {
    #[test]
    fn pin_display_parse_round_trip(pin in any_pin()) {
        let text = pin.to_string();
        prop_assert_eq!(text.parse::<PinAddress>().unwrap(), pin);
    }

    #[test]
    fn pin_parser_never_panics(text in "\\PC{0,8}") {
        // Accepted or rejected, never a panic; accepted values must
        // survive a Display/parse round trip.
        if let Ok(pin) = text.parse::<PinAddress>() {
            prop_assert_eq!(pin.to_string().parse::<PinAddress>().unwrap(), pin);
        }
    }

    #[test]
    fn config_wire_round_trip(
        timestamp0 in proptest::num::i64::ANY,
        delay_interval in proptest::num::u32::ANY,
        led in any_pin(),
        pins in prop::collection::vec((any_pin(), any_pin(), any_pin()), 0..6),
    ) {
        let count = pins.len();
        let mut payload = format!("{timestamp0},{delay_interval},{led},{count}");
        for (forward, reverse, probe) in &pins {
            payload.push_str(&format!(",{forward},{reverse},{probe}"));
        }

        let config = DeviceConfig::from_wire(&payload);
        prop_assert_eq!(config.timestamp0, timestamp0);
        prop_assert_eq!(config.delay_interval, delay_interval);
        prop_assert_eq!(config.led, led);
        prop_assert_eq!(config.plants.len(), count);
        for (plant, (forward, reverse, probe)) in config.plants.iter().zip(&pins) {
            prop_assert_eq!(plant.config.forward, *forward);
            prop_assert_eq!(plant.config.reverse, *reverse);
            prop_assert_eq!(plant.config.probe, *probe);
            prop_assert!(plant.records.is_empty());
        }

        // And back out through the serialiser.
        prop_assert_eq!(config.to_wire(), payload);
    }

    #[test]
    fn config_parser_total_on_arbitrary_text(payload in "\\PC{0,64}") {
        // Whatever the peer sends, parsing yields a config whose plant
        // vector matches its own count.
        let config = DeviceConfig::from_wire(&payload);
        let _ = config.to_wire();
    }

    #[test]
    fn water_command_parser_total(payload in "\\PC{0,32}") {
        let command = WaterCommand::from_wire(&payload);
        if command.is_actionable() {
            prop_assert!(command.seconds > 0);
            prop_assert!(command.forward.is_assigned());
            prop_assert!(command.reverse.is_assigned());
        }
    }

    #[test]
    fn framer_survives_arbitrary_byte_streams(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut framer = LineFramer::new();
        for byte in bytes {
            let _ = framer.feed(byte);
        }
        // Still operational after the flood: cancel then a known command.
        assert!(framer.feed(b'!').is_none());
        let dispatched: Vec<_> = b"info;".iter().filter_map(|&b| framer.feed(b)).collect();
        prop_assert_eq!(dispatched.len(), 1);
    }
}
