//! Overrun accounting through a deliberately tiny ring.

use std::sync::{Mutex, MutexGuard, Once};

use ulog::cobs::{self, SENTINEL};
use ulog::ports::hosted::CapturePort;
use ulog::{CONTINUATION, ID_OVERRUN};

// Four slots: three usable, per the full-detection invariant.
static LOGGER: ulog::Engine<CapturePort, 4> = ulog::Engine::new();

fn setup() -> MutexGuard<'static, ()> {
    static GUARD: Mutex<()> = Mutex::new(());
    static INIT: Once = Once::new();

    let guard = GUARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    INIT.call_once(|| LOGGER.init().expect("sole engine of this binary"));
    CapturePort::set_ready(true);
    ulog::flush();
    CapturePort::reset();
    guard
}

fn drain_payloads() -> Vec<Vec<u8>> {
    ulog::flush();
    CapturePort::take_frames()
        .iter()
        .map(|frame| {
            assert_eq!(*frame.last().unwrap(), SENTINEL);
            let mut payload: heapless::Vec<u8, 64> = heapless::Vec::new();
            cobs::decode(&frame[..frame.len() - 1], &mut payload).unwrap();
            payload.as_slice().to_vec()
        })
        .collect()
}

fn id_of(payload: &[u8]) -> u16 {
    u16::from_le_bytes([payload[0], payload[1]])
}

#[test]
fn the_report_trails_the_survivors() {
    let _guard = setup();

    for round in 0..4u8 {
        ulog::info!("tick {=u8}", round);
    }

    let payloads = drain_payloads();
    assert_eq!(payloads.len(), 4);

    // Three packets survived, the fourth request opened the account.
    for payload in &payloads[..3] {
        assert!(id_of(payload) < ID_OVERRUN);
    }
    assert_eq!(payloads[3], vec![0xFF, 0x7F, 0x01]);

    // The account is settled: producers are accepted again.
    ulog::info!("after the storm");
    let payloads = drain_payloads();
    assert_eq!(payloads.len(), 1);
    assert!(id_of(&payloads[0]) < ID_OVERRUN);
}

#[test]
fn the_counter_saturates_at_255() {
    let _guard = setup();

    for _ in 0..300 {
        ulog::info!("flood");
    }

    let payloads = drain_payloads();
    assert_eq!(payloads.len(), 4);
    assert_eq!(payloads[3], vec![0xFF, 0x7F, 0xFF]);
}

#[test]
fn drain_mode_refuses_mid_drain_producers() {
    let _guard = setup();

    while CapturePort::notifications() < 4 {
        ulog::info!("fill");
    }

    // Pop one packet without settling the account; new calls must still
    // be refused, otherwise their continuation chains would interleave
    // with the half-reported loss.
    ulog::transmit_once();
    ulog::info!("too early {=u8}", 1u8);

    let payloads = drain_payloads();
    // 3 survivors and one report; the mid-drain call only bumped the count.
    assert_eq!(payloads.len(), 4);
    let report = payloads.last().unwrap();
    assert_eq!(id_of(report), ID_OVERRUN);
    assert!(report[2] >= 2);
}

#[test]
fn a_partial_call_is_possible_but_accounted() {
    let _guard = setup();

    // Five packets against three slots: the call is cut short mid-chain.
    ulog::ulog!(
        Debug1,
        "{=u8} {=u8} {=u8} {=u8} {=u8}",
        1u8, 2u8, 3u8, 4u8, 5u8
    );

    let payloads = drain_payloads();
    assert_eq!(payloads.len(), 4);
    assert_eq!(id_of(&payloads[0]) & CONTINUATION, 0);
    assert_eq!(id_of(&payloads[1]) & CONTINUATION, CONTINUATION);
    assert_eq!(id_of(&payloads[2]) & CONTINUATION, CONTINUATION);
    assert_eq!(payloads[3], vec![0xFF, 0x7F, 0x02]);
}
