//! # Deferred binary logging over a compact framed wire format
//!
//! `ulog` is a logging library for targets where formatting a string is
//! already too expensive: small microcontrollers streaming over a slow
//! UART, interrupt handlers that must not block, and hosted processes that
//! want the same wire format for their tooling. The trick is that almost
//! everything about a log call (severity, source location, format string,
//! argument types) is fixed when the binary is built, so none of it needs
//! to travel. Each call site deposits a 256-byte metadata record in a
//! dedicated link section and sends only a 16-bit identifier (derived from
//! the record's address) plus the raw argument bytes; an offline decoder
//! reads the section out of the ELF and puts the message back together.
//!
//! Compared to rendering text through `core::fmt` into a deferred buffer
//! (the `delog` approach), this trades `Debug`-anything flexibility for a
//! closed set of argument types and, in exchange, gets constant-size
//! packets, an interrupt-safe hot path of a few dozen instructions, and a
//! wire cost of two to six payload bytes per packet.
//!
//! ## Pipeline
//!
//! ```text
//! info!(..)  ──(compile time: metadata record, typecode, id)──▶ section "ulog_metadata"
//!    │
//!    └─(run time: argument bytes)──▶ ring buffer ──▶ byte stuffing ──▶ port sink
//!                                        │                                ▲
//!                                     overrun                       send-complete
//!                                     counter                      re-arms transmit
//! ```
//!
//! Producers (any context the port's critical section can serialise,
//! interrupts included) enqueue fixed-size packets and never block: when
//! the ring is full, packets are counted into a saturating overrun counter
//! and reported later in-band. A single cooperative consumer,
//! [`transmit_once`], driven by the port's notification and the sink's
//! send-complete, pulls one packet at a time, frames it with a
//! byte-stuffing codec and hands it to the sink.
//!
//! ## Usage
//!
//! ```no_run
//! use ulog::ports::hosted::StdoutPort;
//!
//! static LOGGER: ulog::Engine<StdoutPort, { ulog::DEFAULT_QUEUE_SIZE }> =
//!     ulog::Engine::new();
//!
//! fn main() {
//!     LOGGER.init().expect("only engine in this process");
//!
//!     let temperature = 36.7f32;
//!     ulog::info!("boot complete");
//!     ulog::info!("temperature {=f32} C", temperature);
//!     ulog::warn!("retries {=u8}, giving up: {=bool}", 3u8, false);
//!
//!     ulog::flush();
//! }
//! ```
//!
//! Format placeholders carry the wire type (`{=u8}`, `{=i16}`, `{=f32}`,
//! `{=str}`, …); the argument must have exactly that type, anything else is
//! rejected when the call is compiled. The string itself is not parsed at
//! run time: it goes into the metadata record byte-for-byte, display
//! refinements (`{=u8:02x}` and friends) included, for the decoder to
//! interpret.
//!
//! ## Compile-time severity ceiling
//!
//! The `max-level-*` cargo features fix the most verbose severity that is
//! compiled in; everything below expands to `()`: no record in the
//! binary, arguments not even evaluated. Without an explicit feature the
//! ceiling is [`Level::Debug3`] in debug builds and [`Level::Info`] in
//! release builds. `error!` is never compiled out.
//!
//! ## Ports
//!
//! The engine reaches its environment only through the [`ports::Port`]
//! trait: a critical section, a sink-ready probe, a byte send and a
//! notification bell. Hosted ports (stdout/stderr, an in-memory capture
//! sink, a background transmitter thread) ship behind the `std` feature;
//! MCU ports are a handful of lines against the UART of the day and live
//! with the board support, not here.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

use cfg_if::cfg_if;

pub mod arguments;
pub mod callsite;
pub mod cobs;
pub mod engine;
mod macros;
pub mod ports;
pub mod queue;

pub use callsite::Level;
pub use engine::{
    engine, flush, register, transmit_once, Engine, InitError, Ulogger, DEFAULT_QUEUE_SIZE,
};

/// The levelled logging entry point: `ulog!(Info, "x = {=u8}", x)`.
///
/// Usually reached through the wrappers ([`error!`], [`warn!`], [`mile!`],
/// [`info!`], [`trace!`], [`debug0!`]..[`debug3!`]), which additionally
/// honour the compile-time severity ceiling. Expands to the callsite
/// metadata record plus the marshalling calls for the arguments.
pub use ulog_macros::ulog;

/// Continuation flag: set on every packet of a call except the first.
pub const CONTINUATION: u16 = 0x8000;

/// Control identifier announcing a (re)started stream.
pub const ID_START: u16 = 0x7FFE;

/// Control identifier reporting lost packets; followed by one count byte.
pub const ID_OVERRUN: u16 = 0x7FFF;

/// Highest identifier available to call sites.
pub const MAX_CALLSITE_ID: u16 = ID_START - 1;

/// Data bytes per packet. A design constant: together with the two
/// identifier bytes it fixes the ring-buffer slot size and bounds every
/// frame to [`engine::FRAME_CAPACITY`] bytes.
pub const MAX_DATA_BYTES: usize = 4;

cfg_if! {
    if #[cfg(feature = "str-max-64")] {
        /// Strings longer than this are truncated with a `...` marker.
        pub const MAX_STR_LEN: usize = 64;
    } else if #[cfg(feature = "str-max-32")] {
        /// Strings longer than this are truncated with a `...` marker.
        pub const MAX_STR_LEN: usize = 32;
    } else {
        /// Strings longer than this are truncated with a `...` marker.
        pub const MAX_STR_LEN: usize = 16;
    }
}

// The truncation path emits whole chunks up to `MAX_STR_LEN - 4` and the
// marker chunk after them.
const _: () = assert!(MAX_STR_LEN % MAX_DATA_BYTES == 0 && MAX_STR_LEN >= 2 * MAX_DATA_BYTES);

cfg_if! {
    if #[cfg(feature = "max-level-debug3")] {
        /// The compile-time severity ceiling of this build.
        pub const MAX_LEVEL: Level = Level::Debug3;
    } else if #[cfg(feature = "max-level-debug2")] {
        /// The compile-time severity ceiling of this build.
        pub const MAX_LEVEL: Level = Level::Debug2;
    } else if #[cfg(feature = "max-level-debug1")] {
        /// The compile-time severity ceiling of this build.
        pub const MAX_LEVEL: Level = Level::Debug1;
    } else if #[cfg(feature = "max-level-debug0")] {
        /// The compile-time severity ceiling of this build.
        pub const MAX_LEVEL: Level = Level::Debug0;
    } else if #[cfg(feature = "max-level-trace")] {
        /// The compile-time severity ceiling of this build.
        pub const MAX_LEVEL: Level = Level::Trace;
    } else if #[cfg(feature = "max-level-info")] {
        /// The compile-time severity ceiling of this build.
        pub const MAX_LEVEL: Level = Level::Info;
    } else if #[cfg(feature = "max-level-mile")] {
        /// The compile-time severity ceiling of this build.
        pub const MAX_LEVEL: Level = Level::Mile;
    } else if #[cfg(feature = "max-level-warn")] {
        /// The compile-time severity ceiling of this build.
        pub const MAX_LEVEL: Level = Level::Warn;
    } else if #[cfg(feature = "max-level-error")] {
        /// The compile-time severity ceiling of this build.
        pub const MAX_LEVEL: Level = Level::Error;
    } else if #[cfg(debug_assertions)] {
        /// The compile-time severity ceiling of this build.
        pub const MAX_LEVEL: Level = Level::Debug3;
    } else {
        /// The compile-time severity ceiling of this build.
        pub const MAX_LEVEL: Level = Level::Info;
    }
}
