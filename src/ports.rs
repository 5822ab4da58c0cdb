//! The port boundary: everything the engine needs from its surroundings.
//!
//! A port adapts the engine to one concrete environment, the way the
//! original firmware ports adapted it to AVR interrupt masks, FreeRTOS
//! event groups or pthreads. The engine calls nothing else: no clock, no
//! allocator, no OS.
//!
//! | function | contract |
//! |---|---|
//! | [`with_critical`] | scoped mutual exclusion around the queue and frame buffer; nestable; callable from interrupt context; the guarded region is bounded and never suspends |
//! | [`sink_ready`] | non-blocking probe: `true` iff a following [`send_bytes`] will neither block nor drop |
//! | [`send_bytes`] | non-blocking handoff of one encoded frame; the buffer is only borrowed for the duration of the call |
//! | [`notify`] | wake the transmit path; set semantics, so coalescing repeated rings is fine; callable from interrupt context |
//!
//! On a bare-metal target `with_critical` is an interrupt mask and
//! `notify` pends the transmit interrupt; on an RTOS they are a mutex and
//! an event bit; the hosted ports in [`hosted`] use `std` locking. The
//! sink's send-complete path is expected to re-invoke
//! [`transmit_once`](crate::transmit_once) once per completed frame.
//!
//! [`with_critical`]: Port::with_critical
//! [`sink_ready`]: Port::sink_ready
//! [`send_bytes`]: Port::send_bytes
//! [`notify`]: Port::notify

#[cfg(feature = "std")]
pub mod hosted;

/// The environment adapter consumed by [`Engine`](crate::Engine).
///
/// All functions are associated rather than methods: a port is a
/// zero-sized environment description, not a value the engine stores.
pub trait Port {
    /// Runs `f` under the port's mutual exclusion.
    fn with_critical<R>(f: impl FnOnce() -> R) -> R;

    /// Whether the transport can take a frame right now.
    fn sink_ready() -> bool;

    /// Hands one encoded frame to the transport.
    fn send_bytes(frame: &[u8]);

    /// Wakes whatever drives [`transmit_once`](crate::transmit_once).
    fn notify();
}
