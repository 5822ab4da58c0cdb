//! Argument-type encoding and marshalling.
//!
//! At compile time every argument of a log call is assigned a 4-bit
//! [`ArgKind`]; up to eight of them pack into the 32-bit typecode stored in
//! the callsite metadata record. At runtime the [`CallWriter`] serialises
//! the argument values into little-endian payload bytes, one ring-buffer
//! packet per argument (strings: one packet per 4-byte chunk), setting the
//! continuation flag on every packet after the first so the decoder can
//! reassemble the call without a length prefix.

use crate::engine::Ulogger;
use crate::{CONTINUATION, MAX_DATA_BYTES, MAX_STR_LEN};

/// 4-bit wire code of an argument type.
///
/// The values are fixed by the metadata format; nibble `i` of the typecode
/// is the code of argument `i`, least-significant nibble first.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArgKind {
    None = 0x0,
    U8 = 0x1,
    S8 = 0x2,
    Bool = 0x3,
    U16 = 0x4,
    S16 = 0x5,
    Ptr16 = 0x6,
    U32 = 0x7,
    S32 = 0x8,
    Float32 = 0x9,
    Str = 0xA,
}

/// Packs up to eight argument kinds into the 32-bit typecode.
///
/// Fails constant evaluation on more than eight arguments; the macro
/// front-end reports the same limit with a proper span first.
pub const fn typecode(kinds: &[ArgKind]) -> u32 {
    assert!(kinds.len() <= 8, "a log call takes at most 8 arguments");
    let mut code = 0u32;
    let mut i = 0;
    while i < kinds.len() {
        code |= (kinds[i] as u32) << (4 * i as u32);
        i += 1;
    }
    code
}

/// Truncation marker chunk: three dots and the string terminator.
const TRUNCATION_CHUNK: [u8; 4] = [b'.', b'.', b'.', 0];

/// Marshals the arguments of one log call into engine packets.
///
/// Constructed by the `ulog!` macro expansion with the callsite identifier;
/// each typed method emits the packets for one argument, and [`finish`]
/// closes the call (emitting the bare identifier packet for argument-less
/// calls) and rings the notification bell exactly once.
///
/// [`finish`]: CallWriter::finish
pub struct CallWriter<'a> {
    engine: &'a dyn Ulogger,
    id: u16,
    opened: bool,
}

impl<'a> CallWriter<'a> {
    pub fn new(engine: &'a dyn Ulogger, id: u16) -> CallWriter<'a> {
        CallWriter {
            engine,
            id,
            opened: false,
        }
    }

    /// One packet. The first of a call carries the plain identifier, all
    /// later ones the continuation flag.
    fn push(&mut self, data: &[u8]) {
        let id = if self.opened {
            self.id | CONTINUATION
        } else {
            self.id
        };
        self.engine.enqueue(id, data);
        self.opened = true;
    }

    pub fn u8(&mut self, value: u8) {
        self.push(&value.to_le_bytes());
    }

    pub fn i8(&mut self, value: i8) {
        self.push(&value.to_le_bytes());
    }

    pub fn bool(&mut self, value: bool) {
        self.push(&[value as u8]);
    }

    pub fn u16(&mut self, value: u16) {
        self.push(&value.to_le_bytes());
    }

    pub fn i16(&mut self, value: i16) {
        self.push(&value.to_le_bytes());
    }

    pub fn u32(&mut self, value: u32) {
        self.push(&value.to_le_bytes());
    }

    pub fn i32(&mut self, value: i32) {
        self.push(&value.to_le_bytes());
    }

    pub fn f32(&mut self, value: f32) {
        self.push(&value.to_bits().to_le_bytes());
    }

    /// A 16-bit address. Truncates on targets with wider pointers; the
    /// kind exists for 16-bit-address machines.
    pub fn ptr16<T>(&mut self, pointer: *const T) {
        self.push(&(pointer as usize as u16).to_le_bytes());
    }

    /// Chunks the string into packets of up to [`MAX_DATA_BYTES`] code
    /// units; the final chunk ends in a NUL. Strings longer than
    /// [`MAX_STR_LEN`] lose their tail to the `...` marker chunk.
    pub fn str(&mut self, value: &str) {
        let bytes = value.as_bytes();

        if bytes.len() > MAX_STR_LEN {
            let mut offset = 0;
            while offset < MAX_STR_LEN - MAX_DATA_BYTES {
                self.push(&bytes[offset..offset + MAX_DATA_BYTES]);
                offset += MAX_DATA_BYTES;
            }
            self.push(&TRUNCATION_CHUNK);
            return;
        }

        let mut offset = 0;
        loop {
            let remaining = bytes.len() - offset;
            if remaining >= MAX_DATA_BYTES {
                self.push(&bytes[offset..offset + MAX_DATA_BYTES]);
                offset += MAX_DATA_BYTES;
                if remaining == MAX_DATA_BYTES {
                    // The terminator did not fit alongside the last code
                    // units; it gets a chunk of its own.
                    self.push(&[0]);
                    break;
                }
            } else {
                let mut chunk = [0u8; MAX_DATA_BYTES];
                chunk[..remaining].copy_from_slice(&bytes[offset..]);
                self.push(&chunk[..remaining + 1]);
                break;
            }
        }
    }

    /// Ends the call. Argument-less calls still announce themselves with a
    /// single data-less packet; the notification port is rung once per
    /// call, after the last packet, outside any critical section.
    pub fn finish(mut self) {
        if !self.opened {
            self.push(&[]);
        }
        self.engine.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Engine double that records enqueued packets and notifications.
    struct Recorder {
        packets: Mutex<Vec<(u16, Vec<u8>)>>,
        notifications: Mutex<usize>,
    }

    impl Recorder {
        fn new() -> Recorder {
            Recorder {
                packets: Mutex::new(Vec::new()),
                notifications: Mutex::new(0),
            }
        }

        fn packets(&self) -> Vec<(u16, Vec<u8>)> {
            self.packets.lock().unwrap().clone()
        }

        fn notifications(&self) -> usize {
            *self.notifications.lock().unwrap()
        }
    }

    impl Ulogger for Recorder {
        fn enqueue(&self, id: u16, data: &[u8]) -> bool {
            self.packets.lock().unwrap().push((id, data.to_vec()));
            true
        }

        fn notify(&self) {
            *self.notifications.lock().unwrap() += 1;
        }

        fn transmit_once(&self) {}

        fn flush(&self) {}
    }

    #[test]
    fn typecode_packs_nibbles_lsb_first() {
        assert_eq!(typecode(&[]), 0);
        assert_eq!(typecode(&[ArgKind::U8]), 0x1);
        assert_eq!(typecode(&[ArgKind::U16, ArgKind::Str]), 0xA4);
        assert_eq!(
            typecode(&[
                ArgKind::U8,
                ArgKind::S8,
                ArgKind::Bool,
                ArgKind::U16,
                ArgKind::S16,
                ArgKind::Ptr16,
                ArgKind::U32,
                ArgKind::S32,
            ]),
            0x8765_4321
        );
    }

    #[test]
    fn no_arguments_is_one_bare_packet() {
        let recorder = Recorder::new();
        CallWriter::new(&recorder, 0x0010).finish();
        assert_eq!(recorder.packets(), vec![(0x0010, vec![])]);
        assert_eq!(recorder.notifications(), 1);
    }

    #[test]
    fn integers_marshal_little_endian() {
        let recorder = Recorder::new();
        let mut writer = CallWriter::new(&recorder, 0x0011);
        writer.u8(0x2A);
        writer.u16(0x1234);
        writer.u32(0xDEAD_BEEF);
        writer.i16(-2);
        writer.finish();

        assert_eq!(
            recorder.packets(),
            vec![
                (0x0011, vec![0x2A]),
                (0x8011, vec![0x34, 0x12]),
                (0x8011, vec![0xEF, 0xBE, 0xAD, 0xDE]),
                (0x8011, vec![0xFE, 0xFF]),
            ]
        );
        assert_eq!(recorder.notifications(), 1);
    }

    #[test]
    fn floats_marshal_as_ieee754_bits() {
        let recorder = Recorder::new();
        let mut writer = CallWriter::new(&recorder, 3);
        writer.f32(1.5);
        writer.finish();

        let packets = recorder.packets();
        assert_eq!(packets.len(), 1);
        let bits = u32::from_le_bytes(packets[0].1.clone().try_into().unwrap());
        assert_eq!(f32::from_bits(bits), 1.5);
    }

    #[test]
    fn bool_and_signed_bytes() {
        let recorder = Recorder::new();
        let mut writer = CallWriter::new(&recorder, 4);
        writer.bool(true);
        writer.bool(false);
        writer.i8(-1);
        writer.finish();

        assert_eq!(
            recorder.packets(),
            vec![(4, vec![1]), (0x8004, vec![0]), (0x8004, vec![0xFF])]
        );
    }

    #[test]
    fn string_chunking_boundaries() {
        // L = 0: one packet holding a single terminator.
        let recorder = Recorder::new();
        let mut writer = CallWriter::new(&recorder, 5);
        writer.str("");
        writer.finish();
        assert_eq!(recorder.packets(), vec![(5, vec![0])]);

        // L = 2: code units and terminator share the chunk.
        let recorder = Recorder::new();
        let mut writer = CallWriter::new(&recorder, 5);
        writer.str("AB");
        writer.finish();
        assert_eq!(recorder.packets(), vec![(5, vec![0x41, 0x42, 0])]);

        // L = 4k: the terminator spills into its own packet.
        let recorder = Recorder::new();
        let mut writer = CallWriter::new(&recorder, 5);
        writer.str("ABCD");
        writer.finish();
        assert_eq!(
            recorder.packets(),
            vec![(5, vec![0x41, 0x42, 0x43, 0x44]), (0x8005, vec![0])]
        );

        // ceil((L + 1) / 4) packets across one chunk-count window.
        for len in 5..=8usize {
            let recorder = Recorder::new();
            let mut writer = CallWriter::new(&recorder, 5);
            let s: String = core::iter::repeat('x').take(len).collect();
            writer.str(&s);
            writer.finish();
            assert_eq!(recorder.packets().len(), (len + 1).div_ceil(4), "L={}", len);
        }
    }

    #[test]
    fn string_truncation_replaces_the_tail() {
        // Maximum length passes untouched.
        let recorder = Recorder::new();
        let mut writer = CallWriter::new(&recorder, 6);
        let exact: String = core::iter::repeat('a').take(MAX_STR_LEN).collect();
        writer.str(&exact);
        writer.finish();
        let packets = recorder.packets();
        assert_eq!(packets.len(), MAX_STR_LEN / 4 + 1);
        assert_eq!(packets.last().unwrap().1, vec![0]);

        // One over: full chunks of the head, then the marker chunk.
        let recorder = Recorder::new();
        let mut writer = CallWriter::new(&recorder, 6);
        let over: String = core::iter::repeat('a').take(MAX_STR_LEN + 1).collect();
        writer.str(&over);
        writer.finish();
        let packets = recorder.packets();
        assert_eq!(packets.len(), MAX_STR_LEN / 4);
        assert_eq!(packets.last().unwrap().1, vec![b'.', b'.', b'.', 0]);
        let emitted: usize = packets.iter().map(|(_, d)| d.len()).sum();
        assert!(emitted <= MAX_STR_LEN);
    }

    #[test]
    fn first_string_chunk_only_continues_when_not_first_packet() {
        let recorder = Recorder::new();
        let mut writer = CallWriter::new(&recorder, 7);
        writer.u8(1);
        writer.str("hi");
        writer.finish();

        let packets = recorder.packets();
        assert_eq!(packets[0].0, 7);
        assert_eq!(packets[1].0, 0x8007);
    }
}
