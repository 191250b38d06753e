use nfctrace::protocol::CommandDetector;
use nfctrace::{Direction, Frame, Technology};
use proptest::prelude::*;

fn technology() -> impl Strategy<Value = Technology> {
    prop_oneof![
        Just(Technology::NfcA),
        Just(Technology::NfcB),
        Just(Technology::NfcF),
        Just(Technology::NfcV),
        Just(Technology::Iso7816),
        Just(Technology::Unknown),
    ]
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Poll),
        Just(Direction::Listen),
        Just(Direction::CarrierOn),
        Just(Direction::CarrierOff),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn decoders_never_panic(
        tech in technology(),
        direction in direction(),
        payload in prop::collection::vec(any::<u8>(), 0..64),
        request in prop::option::of(any::<u8>()),
        iso_dep in any::<bool>(),
    ) {
        let d = CommandDetector::new().with_iso_dep(iso_dep);
        let frame = Frame::new(0.0, tech, direction, payload);
        let name = d.detect(&frame, request);

        let parsed_request = d.parse_request(&frame);
        let parsed_response = d.parse_response(&frame, request);
        if let Some(req) = &parsed_request {
            let _ = (req.command_code(), req.identifier(), req.params(), req.checksum());
        }
        if let Some(resp) = &parsed_response {
            let _ = (resp.command_code(), resp.identifier(), resp.error_code());
        }

        if frame.is_empty() || frame.is_carrier() {
            prop_assert_eq!(name, None);
            prop_assert!(parsed_request.is_none());
            prop_assert!(parsed_response.is_none());
        }
        if !frame.is_poll() {
            prop_assert!(parsed_request.is_none());
        }
    }

    #[test]
    fn detection_is_deterministic(
        tech in technology(),
        payload in prop::collection::vec(any::<u8>(), 1..32),
        request in prop::option::of(any::<u8>()),
    ) {
        let d = CommandDetector::new();
        let poll = Frame::poll(0.0, tech, &payload);
        let listen = Frame::listen(0.0, tech, &payload);
        prop_assert_eq!(d.detect(&poll, None), d.detect(&poll, None));
        prop_assert_eq!(d.detect(&listen, request), d.detect(&listen, request));
    }

    #[test]
    fn annotation_matches_detection(
        tech in technology(),
        payload in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let d = CommandDetector::new();
        let mut frame = Frame::poll(0.0, tech, &payload);
        let expected = d.detect(&frame, None);
        prop_assert_eq!(d.annotate(&mut frame, None), expected);
        prop_assert_eq!(frame.decoded_command(), expected);
    }
}

#[test]
fn unknown_technology_is_never_classified() {
    let d = CommandDetector::new();
    let frame = Frame::poll(0.0, Technology::Unknown, &[0x02, 0x00, 0xa4]);
    assert_eq!(d.detect(&frame, None), None);
    assert!(d.parse_request(&frame).is_none());
}
