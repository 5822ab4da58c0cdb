//! Ports for hosted processes, in the shape of the original's Linux port:
//! a mutex for the critical section, a condition variable for the bell,
//! and byte sinks over the standard streams.
//!
//! Frames are raw bytes, so [`StdoutPort`] is only pleasant when stdout is
//! redirected into a file or a decoder; interactive runs are better served
//! by [`CapturePort`], which keeps frames in memory for inspection and
//! doubles as the test-suite sink.

use std::io::Write;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::thread;

use super::Port;

static CRITICAL: Mutex<()> = Mutex::new(());

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking producer must not silence every later log call.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

static BELL_PENDING: Mutex<bool> = Mutex::new(false);
static BELL: Condvar = Condvar::new();

fn ring_bell() {
    let mut pending = locked(&BELL_PENDING);
    *pending = true;
    BELL.notify_one();
}

fn wait_for_bell() {
    let mut pending = locked(&BELL_PENDING);
    while !*pending {
        pending = BELL
            .wait(pending)
            .unwrap_or_else(|poisoned| poisoned.into_inner());
    }
    *pending = false;
}

/// Spawns the background transmitter: a thread that sleeps on the bell and
/// drains the engine whenever a producer rings it. The hosted equivalent
/// of wiring the UART send-complete interrupt back into the engine.
///
/// The thread runs for the remaining lifetime of the process.
pub fn spawn_transmitter() -> thread::JoinHandle<()> {
    thread::spawn(|| loop {
        wait_for_bell();
        crate::flush();
    })
}

/// Writes frames to standard output.
pub struct StdoutPort;

impl Port for StdoutPort {
    fn with_critical<R>(f: impl FnOnce() -> R) -> R {
        let _guard = locked(&CRITICAL);
        f()
    }

    fn sink_ready() -> bool {
        true
    }

    fn send_bytes(frame: &[u8]) {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(frame).ok();
        stdout.flush().ok();
    }

    fn notify() {
        ring_bell();
    }
}

/// Writes frames to standard error.
pub struct StderrPort;

impl Port for StderrPort {
    fn with_critical<R>(f: impl FnOnce() -> R) -> R {
        let _guard = locked(&CRITICAL);
        f()
    }

    fn sink_ready() -> bool {
        true
    }

    fn send_bytes(frame: &[u8]) {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(frame).ok();
        stderr.flush().ok();
    }

    fn notify() {
        ring_bell();
    }
}

static CAPTURED: Mutex<Vec<Vec<u8>>> = Mutex::new(Vec::new());
static CAPTURE_READY: Mutex<bool> = Mutex::new(true);
static NOTIFICATIONS: Mutex<usize> = Mutex::new(0);

/// An in-memory sink: frames and notifications are recorded instead of
/// sent, and readiness can be toggled to exercise the not-ready path.
///
/// This is the deterministic driver the integration tests run against;
/// nothing in it depends on timing or threads.
pub struct CapturePort;

impl CapturePort {
    /// All frames sent since the last take, oldest first.
    pub fn take_frames() -> Vec<Vec<u8>> {
        core::mem::take(&mut *locked(&CAPTURED))
    }

    /// Makes [`Port::sink_ready`] answer `ready` until further notice.
    pub fn set_ready(ready: bool) {
        *locked(&CAPTURE_READY) = ready;
    }

    /// Number of notification rings since the last reset.
    pub fn notifications() -> usize {
        *locked(&NOTIFICATIONS)
    }

    /// Clears frames and notification count; readiness returns to `true`.
    pub fn reset() {
        locked(&CAPTURED).clear();
        *locked(&CAPTURE_READY) = true;
        *locked(&NOTIFICATIONS) = 0;
    }
}

impl Port for CapturePort {
    fn with_critical<R>(f: impl FnOnce() -> R) -> R {
        let _guard = locked(&CRITICAL);
        f()
    }

    fn sink_ready() -> bool {
        *locked(&CAPTURE_READY)
    }

    fn send_bytes(frame: &[u8]) {
        locked(&CAPTURED).push(frame.to_vec());
    }

    fn notify() {
        *locked(&NOTIFICATIONS) += 1;
    }
}
