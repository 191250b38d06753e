#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use nfctrace::session::{PairingConfig, TransactionPairer, pair_all};
use nfctrace::test_support::{listen_hex, poll_hex, script};
use nfctrace::{Direction, Frame, Technology};
use proptest::prelude::*;

#[test]
fn answered_poll_is_complete() {
    common::init_logger();
    let txs = pair_all(
        [
            poll_hex(0.000, Technology::NfcA, "26"),
            listen_hex(0.0005, Technology::NfcA, "0400"),
        ],
        PairingConfig::default(),
    );
    assert_eq!(txs.len(), 1);
    assert!(txs[0].is_complete());
    assert!((txs[0].duration().unwrap() - 0.0005).abs() < 1e-9);
}

#[test]
fn unanswered_poll_flushed_at_end() {
    let mut pairer = TransactionPairer::new(PairingConfig::default());
    assert!(pairer.push(poll_hex(0.0, Technology::NfcA, "52")).is_none());
    assert!(!pairer.is_idle());
    let tx = pairer.finish().unwrap();
    assert!(!tx.is_complete());
    assert_eq!(tx.request().payload(), &[0x52]);
    assert!(pairer.is_idle());
    assert!(pairer.finish().is_none());
}

#[test]
fn late_listen_is_not_matched() {
    common::init_logger();
    let mut pairer = TransactionPairer::new(PairingConfig::with_timeout_ms(100));
    assert!(pairer.push(poll_hex(0.0, Technology::NfcA, "26")).is_none());
    let tx = pairer.push(listen_hex(0.2, Technology::NfcA, "0400")).unwrap();
    assert!(!tx.is_complete());
    assert_eq!(tx.request().timestamp(), 0.0);
    // the late listen does not linger as a pending frame
    assert!(pairer.is_idle());
    assert!(pairer.finish().is_none());
}

#[test]
fn second_poll_supersedes_first() {
    let txs = pair_all(
        script(&[
            (0.000, Technology::NfcA, Direction::Poll, "26"),
            (0.001, Technology::NfcA, Direction::Poll, "52"),
            (0.0015, Technology::NfcA, Direction::Listen, "0400"),
        ]),
        PairingConfig::default(),
    );
    assert_eq!(txs.len(), 2);
    assert!(!txs[0].is_complete());
    assert_eq!(txs[0].request().payload(), &[0x26]);
    assert!(txs[1].is_complete());
    assert_eq!(txs[1].request().payload(), &[0x52]);
}

#[test]
fn carrier_events_do_not_disturb_pairing() {
    let txs = pair_all(
        [
            Frame::carrier(0.0, true),
            poll_hex(0.001, Technology::NfcA, "26"),
            Frame::carrier(0.0012, false),
            listen_hex(0.0015, Technology::NfcA, "0400"),
            Frame::carrier(0.002, true),
        ],
        PairingConfig::default(),
    );
    assert_eq!(txs.len(), 1);
    assert!(txs[0].is_complete());
}

#[test]
fn listen_without_poll_is_dropped() {
    let mut pairer = TransactionPairer::default();
    assert!(pairer.push(listen_hex(0.0, Technology::NfcA, "0400")).is_none());
    assert!(pairer.is_idle());
}

#[test]
fn timeout_boundary_is_inclusive() {
    let config = PairingConfig::with_timeout(Duration::from_millis(100));
    let txs = pair_all(
        [poll_hex(0.0, Technology::NfcA, "26"), listen_hex(0.1, Technology::NfcA, "0400")],
        config,
    );
    assert!(txs[0].is_complete());
}

fn frame_stream() -> impl Strategy<Value = Vec<Frame>> {
    prop::collection::vec((0u32..2_000, 0u8..4), 0..40).prop_map(|steps| {
        let mut t = 0.0;
        steps
            .into_iter()
            .map(|(gap, kind)| {
                t += f64::from(gap) * 1e-4;
                match kind {
                    0 | 1 => Frame::poll(t, Technology::NfcA, &[0x26]),
                    2 => Frame::listen(t, Technology::NfcA, &[0x04, 0x00]),
                    _ => Frame::carrier(t, true),
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn every_poll_lands_in_exactly_one_transaction(frames in frame_stream()) {
        let polls = frames.iter().filter(|f| f.is_poll()).count();
        let txs = pair_all(frames.clone(), PairingConfig::default());
        prop_assert_eq!(txs.len(), polls);
        for tx in &txs {
            prop_assert!(tx.request().is_poll());
            if let Some(response) = tx.response() {
                prop_assert!(response.is_listen());
                let gap = tx.duration().unwrap();
                prop_assert!((0.0..=0.1).contains(&gap));
            }
        }
    }

    #[test]
    fn pairing_is_repeatable(frames in frame_stream()) {
        let first = pair_all(frames.clone(), PairingConfig::default());
        let second = pair_all(frames, PairingConfig::default());
        prop_assert_eq!(first, second);
    }
}
