//! The runtime ingress/egress engine.
//!
//! An [`Engine`] owns the packet queue, the single outgoing frame buffer
//! and the transmit state, all behind the port's critical section. One
//! engine is registered process-wide (link-time singleton in spirit, an
//! atomic one-shot slot in practice, since Rust has no constructor
//! sections); the logging macros reach it through [`engine()`] and degrade
//! to silence while nothing is registered yet.
//!
//! Transmission is cooperative: producers enqueue and ring the port's
//! notification, whatever the port wakes (ISR, idle hook, thread) calls
//! [`transmit_once`], and the sink's send-complete re-invokes it for the
//! next packet. [`flush`] busy-drives the same path to completion.

use core::cell::UnsafeCell;
use core::fmt;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::cobs;
use crate::ports::Port;
use crate::queue::Queue;
use crate::{ID_OVERRUN, ID_START, MAX_DATA_BYTES};

/// Ring capacity used by the examples and a reasonable default for hosted
/// targets. Deeply embedded deployments pick their own `N`.
pub const DEFAULT_QUEUE_SIZE: usize = 64;

/// Scratch capacity for one encoded frame: identifier, data, worst-case
/// stuffing overhead.
pub const FRAME_CAPACITY: usize = 2 + MAX_DATA_BYTES + 2;

/// Object-safe face of an engine, as seen by the marshaller and the free
/// functions. Implemented by [`Engine`]; test suites substitute recording
/// doubles.
pub trait Ulogger: Sync {
    /// Queues one wire payload. Returns `false` when the packet was
    /// absorbed into the overrun account instead.
    fn enqueue(&self, id: u16, data: &[u8]) -> bool;

    /// Rings the port's notification bell.
    fn notify(&self);

    /// Sends at most one pending frame, if the sink is ready.
    fn transmit_once(&self);

    /// Drives transmission until queue and overrun account are clear.
    fn flush(&self);
}

/// The deferred-logging engine for port `P` with a ring of `N` slots.
///
/// Declared as a `static` by the application and registered once:
///
/// ```no_run
/// use ulog::ports::hosted::StdoutPort;
///
/// static LOGGER: ulog::Engine<StdoutPort, { ulog::DEFAULT_QUEUE_SIZE }> =
///     ulog::Engine::new();
///
/// fn main() {
///     LOGGER.init().expect("first and only engine");
///     ulog::info!("engine up");
///     ulog::flush();
/// }
/// ```
pub struct Engine<P: Port, const N: usize> {
    queue: UnsafeCell<Queue<N>>,
    scratch: UnsafeCell<heapless::Vec<u8, FRAME_CAPACITY>>,
    started: AtomicBool,
    _port: PhantomData<P>,
}

// All interior state is only touched inside `P::with_critical`.
unsafe impl<P: Port, const N: usize> Sync for Engine<P, N> {}

impl<P: Port, const N: usize> Engine<P, N> {
    pub const fn new() -> Engine<P, N> {
        Engine {
            queue: UnsafeCell::new(Queue::new()),
            scratch: UnsafeCell::new(heapless::Vec::new()),
            started: AtomicBool::new(false),
            _port: PhantomData,
        }
    }

    /// Registers this engine as the process-wide logger and announces the
    /// stream with the START frame.
    pub fn init(&'static self) -> Result<(), InitError> {
        register(self)?;
        self.bootstrap();
        Ok(())
    }

    /// Frames and sends the START control frame. Runs at most once per
    /// engine, before any queued packet reaches the sink; the decoder uses
    /// it to discard stale bytes on the link.
    pub fn bootstrap(&self) {
        if self.started.swap(true, Ordering::AcqRel) {
            return;
        }
        P::with_critical(|| {
            let scratch = unsafe { &mut *self.scratch.get() };
            cobs::encode(&ID_START.to_le_bytes(), scratch);
            P::send_bytes(scratch);
        });
    }

    fn drained(&self) -> bool {
        P::with_critical(|| {
            let queue = unsafe { &*self.queue.get() };
            queue.is_empty() && queue.overrun() == 0
        })
    }
}

impl<P: Port, const N: usize> Ulogger for Engine<P, N> {
    fn enqueue(&self, id: u16, data: &[u8]) -> bool {
        P::with_critical(|| unsafe { &mut *self.queue.get() }.enqueue(id, data))
    }

    fn notify(&self) {
        P::notify();
    }

    fn transmit_once(&self) {
        P::with_critical(|| {
            // The sink may clear between this probe and the send; in that
            // case its send-complete will re-invoke us anyway.
            if !P::sink_ready() {
                return;
            }

            let queue = unsafe { &mut *self.queue.get() };
            let scratch = unsafe { &mut *self.scratch.get() };

            if let Some(packet) = queue.try_pop() {
                cobs::encode(packet.payload(), scratch);
                P::send_bytes(scratch);
            } else if let Some(count) = queue.overrun_take() {
                let mut payload = [0u8; 3];
                payload[..2].copy_from_slice(&ID_OVERRUN.to_le_bytes());
                payload[2] = count;
                cobs::encode(&payload, scratch);
                P::send_bytes(scratch);
            }
        });
    }

    fn flush(&self) {
        while !self.drained() {
            self.transmit_once();
        }
    }
}

/// Why engine registration was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    /// Another engine already claimed the process-wide slot.
    AlreadyRegistered,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::AlreadyRegistered => f.write_str("a logging engine is already registered"),
        }
    }
}

const SLOT_EMPTY: u8 = 0;
const SLOT_CLAIMED: u8 = 1;
const SLOT_READY: u8 = 2;

static SLOT_STATE: AtomicU8 = AtomicU8::new(SLOT_EMPTY);
static mut SLOT: Option<&'static dyn Ulogger> = None;

/// Claims the process-wide engine slot, once.
pub fn register(engine: &'static dyn Ulogger) -> Result<(), InitError> {
    match SLOT_STATE.compare_exchange(
        SLOT_EMPTY,
        SLOT_CLAIMED,
        Ordering::AcqRel,
        Ordering::Acquire,
    ) {
        Ok(_) => {
            unsafe { SLOT = Some(engine) };
            SLOT_STATE.store(SLOT_READY, Ordering::Release);
            Ok(())
        }
        Err(_) => Err(InitError::AlreadyRegistered),
    }
}

/// The registered engine, if any. Logging macros treat `None` as "drop the
/// call", so libraries may log before the application has initialised.
pub fn engine() -> Option<&'static dyn Ulogger> {
    if SLOT_STATE.load(Ordering::Acquire) == SLOT_READY {
        unsafe { SLOT }
    } else {
        None
    }
}

/// Sends at most one pending frame through the registered engine. Called
/// by the port's wake-up path (reactor handler, idle hook, transmit
/// thread) and by the sink's send-complete.
pub fn transmit_once() {
    if let Some(engine) = engine() {
        engine.transmit_once();
    }
}

/// Busy-drives the registered engine until nothing is pending. Safe only
/// from contexts that may wait on the sink; idempotent when already idle.
pub fn flush() {
    if let Some(engine) = engine() {
        engine.flush();
    }
}
