//! A whole session over one contiguous byte stream: stale link noise,
//! START, live calls, an overrun report, all reassembled on the far end
//! with the incremental deframer.

use std::sync::{Mutex, MutexGuard};

use ulog::cobs::Deframer;
use ulog::ports::Port;
use ulog::{CONTINUATION, ID_OVERRUN, ID_START};

static CRITICAL: Mutex<()> = Mutex::new(());
static STREAM: Mutex<Vec<u8>> = Mutex::new(Vec::new());

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A sink that concatenates every frame into one byte pipe, the way a
/// UART would see them.
struct StreamPort;

impl Port for StreamPort {
    fn with_critical<R>(f: impl FnOnce() -> R) -> R {
        let _guard = locked(&CRITICAL);
        f()
    }

    fn sink_ready() -> bool {
        true
    }

    fn send_bytes(frame: &[u8]) {
        locked(&STREAM).extend_from_slice(frame);
    }

    fn notify() {}
}

static LOGGER: ulog::Engine<StreamPort, 8> = ulog::Engine::new();

fn id_of(payload: &[u8]) -> u16 {
    u16::from_le_bytes([payload[0], payload[1]])
}

#[test]
fn a_session_reassembles_from_the_byte_stream() {
    // Stale bytes already sitting on the link before the engine starts.
    locked(&STREAM).extend_from_slice(&[0x42, 0x42]);

    LOGGER.init().expect("sole engine of this binary");

    ulog::info!("hello");
    ulog::warn!("x={=u8},y={=u16}", 7u8, 0x0102u16);
    ulog::flush();

    // Seven slots usable: out of ten single-packet calls, three are lost
    // and reported in-band once the ring drains.
    for round in 0..10u8 {
        ulog::info!("flood {=u8}", round);
    }
    ulog::flush();

    // Far end: split the pipe on the sentinel and decode each frame.
    let stream = locked(&STREAM).clone();
    let mut deframer: Deframer<16> = Deframer::new();
    let mut frames = Vec::new();
    for byte in stream {
        if let Some(result) = deframer.push(byte) {
            frames.push(result);
        }
    }

    // The noise swallowed the START frame's bytes; everything up to the
    // first sentinel decodes to junk, which a receiver drops.
    assert!(frames[0].is_err() || id_of(frames[0].as_ref().unwrap()) != ID_START);

    let payloads: Vec<Vec<u8>> = frames[1..]
        .iter()
        .map(|result| result.as_ref().unwrap().as_slice().to_vec())
        .collect();
    assert_eq!(payloads.len(), 1 + 2 + 7 + 1);

    // "hello": one bare payload.
    assert_eq!(payloads[0].len(), 2);
    let hello = id_of(&payloads[0]);
    assert_eq!(hello & CONTINUATION, 0);

    // The two-argument call: one packet per argument, chained.
    let first = id_of(&payloads[1]);
    assert_eq!(first & CONTINUATION, 0);
    assert_eq!(&payloads[1][2..], &[0x07]);
    assert_eq!(id_of(&payloads[2]), first | CONTINUATION);
    assert_eq!(&payloads[2][2..], &[0x02, 0x01]);

    // Seven survivors of the flood, in order, then the report.
    for (index, payload) in payloads[3..10].iter().enumerate() {
        assert_eq!(&payload[2..], &[index as u8]);
    }
    let report = payloads.last().unwrap();
    assert_eq!(id_of(report), ID_OVERRUN);
    assert_eq!(report[2], 3);
}
