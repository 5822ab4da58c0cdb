//! Callsite metadata records and the link-time region they live in.
//!
//! Every surviving textual invocation of the logging macros reserves one
//! 256-byte [`CallsiteRecord`] in the dedicated `ulog_metadata` section.
//! The record never travels on the wire: an offline decoder reads it back
//! out of the linked image and resolves the numeric identifier that *does*
//! travel. The identifier is derived from the record's address alone, so no
//! runtime table exists:
//!
//! ```text
//! id = (record_address - region_base) >> 8
//! ```
//!
//! Records are 256-aligned and exactly 256 bytes, which makes the
//! derivation a single shift. The section name is a valid C identifier so
//! that GNU ld and LLD synthesise `__start_ulog_metadata` /
//! `__stop_ulog_metadata` bounds without any linker-script support. On
//! deeply embedded targets the deployment's linker script would typically
//! mark the output section `NOLOAD`; that glue lives outside this crate.

use core::fmt;

/// Severity of a log call, in decreasing order of importance.
///
/// The numeric values are part of the metadata record format and must not
/// be reordered.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error = 0,
    Warn = 1,
    /// Milestone: progress marks that survive well above debug noise.
    Mile = 2,
    Info = 3,
    Trace = 4,
    Debug0 = 5,
    Debug1 = 6,
    Debug2 = 7,
    Debug3 = 8,
}

impl Level {
    /// Inverse of `level as u8`.
    pub const fn from_u8(raw: u8) -> Option<Level> {
        match raw {
            0 => Some(Level::Error),
            1 => Some(Level::Warn),
            2 => Some(Level::Mile),
            3 => Some(Level::Info),
            4 => Some(Level::Trace),
            5 => Some(Level::Debug0),
            6 => Some(Level::Debug1),
            7 => Some(Level::Debug2),
            8 => Some(Level::Debug3),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Mile => "MILE",
            Level::Info => "INFO",
            Level::Trace => "TRACE",
            Level::Debug0 => "DEBUG0",
            Level::Debug1 => "DEBUG1",
            Level::Debug2 => "DEBUG2",
            Level::Debug3 => "DEBUG3",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capacity of the inline file-path field, terminator included.
pub const FILE_CAPACITY: usize = 116;
/// Capacity of the inline format-string field, terminator included.
pub const FMT_CAPACITY: usize = 128;

/// One fixed-layout metadata record, as stored in the `ulog_metadata`
/// section of the linked image.
///
/// Layout (256 bytes, 256-aligned):
///
/// | offset | size | field |
/// |--------|------|------------------------------------|
/// | 0      | 1    | severity level                     |
/// | 1      | 3    | reserved                           |
/// | 4      | 4    | source line                        |
/// | 8      | 4    | argument typecode                  |
/// | 12     | 116  | source file path, NUL-terminated   |
/// | 128    | 128  | format string, NUL-terminated      |
///
/// Records are immutable after link time; the constructor is `const` and
/// rejects overlong literals during constant evaluation, so an oversized
/// path or format string fails the build rather than truncating silently.
#[repr(C, align(256))]
pub struct CallsiteRecord {
    level: u8,
    reserved: [u8; 3],
    line: u32,
    typecode: u32,
    file: [u8; FILE_CAPACITY],
    fmt: [u8; FMT_CAPACITY],
}

const _: () = assert!(core::mem::size_of::<CallsiteRecord>() == 256);
const _: () = assert!(core::mem::align_of::<CallsiteRecord>() == 256);

impl CallsiteRecord {
    /// Builds a record at compile time. Intended to be called by the
    /// `ulog!` macro expansion only.
    pub const fn new(
        level: Level,
        line: u32,
        typecode: u32,
        file: &str,
        fmt: &str,
    ) -> CallsiteRecord {
        CallsiteRecord {
            level: level as u8,
            reserved: [0; 3],
            line,
            typecode,
            file: pack_str::<FILE_CAPACITY>(file),
            fmt: pack_str::<FMT_CAPACITY>(fmt),
        }
    }

    pub const fn level(&self) -> Option<Level> {
        Level::from_u8(self.level)
    }

    pub const fn line(&self) -> u32 {
        self.line
    }

    pub const fn typecode(&self) -> u32 {
        self.typecode
    }

    pub fn file(&self) -> &str {
        str_field(&self.file)
    }

    pub fn fmt_str(&self) -> &str {
        str_field(&self.fmt)
    }
}

/// Copies `s` into a NUL-terminated fixed array, failing constant
/// evaluation if it does not fit.
const fn pack_str<const CAP: usize>(s: &str) -> [u8; CAP] {
    let bytes = s.as_bytes();
    assert!(
        bytes.len() < CAP,
        "string literal does not fit the metadata record"
    );
    let mut out = [0u8; CAP];
    let mut i = 0;
    while i < bytes.len() {
        out[i] = bytes[i];
        i += 1;
    }
    out
}

/// The stored bytes up to the first NUL. The constructor only ever stores
/// a valid UTF-8 prefix, so decoding cannot fail on records it built.
fn str_field(field: &[u8]) -> &str {
    let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    core::str::from_utf8(&field[..len]).unwrap_or("")
}

// Keeps the section present (with zero size) even in images without a
// single surviving call site, so the linker-synthesised bounds below
// always resolve.
#[link_section = "ulog_metadata"]
#[used]
static _REGION_ANCHOR: [CallsiteRecord; 0] = [];

extern "C" {
    #[link_name = "__start_ulog_metadata"]
    static REGION_START: CallsiteRecord;
    #[link_name = "__stop_ulog_metadata"]
    static REGION_STOP: CallsiteRecord;
}

fn region_base() -> usize {
    unsafe { core::ptr::addr_of!(REGION_START) as usize }
}

/// All records linked into the running image, in address order.
///
/// The slice index of a record equals its wire identifier.
pub fn callsites() -> &'static [CallsiteRecord] {
    unsafe {
        let start = core::ptr::addr_of!(REGION_START) as usize;
        let stop = core::ptr::addr_of!(REGION_STOP) as usize;
        let count = (stop - start) / core::mem::size_of::<CallsiteRecord>();
        core::slice::from_raw_parts(start as *const CallsiteRecord, count)
    }
}

/// Derives the wire identifier of a record from its address.
pub fn callsite_id(record: &'static CallsiteRecord) -> u16 {
    let offset = record as *const CallsiteRecord as usize - region_base();
    (offset >> 8) as u16
}
