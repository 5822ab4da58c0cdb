//! Levelled convenience macros over the `ulog!` entry point.
//!
//! Each severity gets a real and a stub definition selected by `cfg`, so a
//! call below the compile-time ceiling expands to `()`: no metadata
//! record, no argument evaluation, no code. The ceiling comes from the
//! `max-level-*` features; without one it is `DEBUG3` in debug builds and
//! `INFO` in release builds.
//!
//! `ERROR` has no stub: it is never compiled out.

/// Logs at `ERROR` severity.
#[macro_export]
macro_rules! error {
    ($($args:tt)*) => {
        $crate::ulog!(Error, $($args)*)
    };
}

/// Logs at `WARN` severity.
#[cfg(any(
    feature = "max-level-warn",
    feature = "max-level-mile",
    feature = "max-level-info",
    feature = "max-level-trace",
    feature = "max-level-debug0",
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    not(any(
        feature = "max-level-error",
        feature = "max-level-warn",
        feature = "max-level-mile",
        feature = "max-level-info",
        feature = "max-level-trace",
        feature = "max-level-debug0",
        feature = "max-level-debug1",
        feature = "max-level-debug2",
        feature = "max-level-debug3",
    )),
))]
#[macro_export]
macro_rules! warn {
    ($($args:tt)*) => {
        $crate::ulog!(Warn, $($args)*)
    };
}

#[cfg(not(any(
    feature = "max-level-warn",
    feature = "max-level-mile",
    feature = "max-level-info",
    feature = "max-level-trace",
    feature = "max-level-debug0",
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    not(any(
        feature = "max-level-error",
        feature = "max-level-warn",
        feature = "max-level-mile",
        feature = "max-level-info",
        feature = "max-level-trace",
        feature = "max-level-debug0",
        feature = "max-level-debug1",
        feature = "max-level-debug2",
        feature = "max-level-debug3",
    )),
)))]
#[macro_export]
#[doc(hidden)]
macro_rules! warn {
    ($($args:tt)*) => {
        ()
    };
}

/// Logs at `MILE` severity (milestones).
#[cfg(any(
    feature = "max-level-mile",
    feature = "max-level-info",
    feature = "max-level-trace",
    feature = "max-level-debug0",
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    not(any(
        feature = "max-level-error",
        feature = "max-level-warn",
        feature = "max-level-mile",
        feature = "max-level-info",
        feature = "max-level-trace",
        feature = "max-level-debug0",
        feature = "max-level-debug1",
        feature = "max-level-debug2",
        feature = "max-level-debug3",
    )),
))]
#[macro_export]
macro_rules! mile {
    ($($args:tt)*) => {
        $crate::ulog!(Mile, $($args)*)
    };
}

#[cfg(not(any(
    feature = "max-level-mile",
    feature = "max-level-info",
    feature = "max-level-trace",
    feature = "max-level-debug0",
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    not(any(
        feature = "max-level-error",
        feature = "max-level-warn",
        feature = "max-level-mile",
        feature = "max-level-info",
        feature = "max-level-trace",
        feature = "max-level-debug0",
        feature = "max-level-debug1",
        feature = "max-level-debug2",
        feature = "max-level-debug3",
    )),
)))]
#[macro_export]
#[doc(hidden)]
macro_rules! mile {
    ($($args:tt)*) => {
        ()
    };
}

/// Logs at `INFO` severity.
#[cfg(any(
    feature = "max-level-info",
    feature = "max-level-trace",
    feature = "max-level-debug0",
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    not(any(
        feature = "max-level-error",
        feature = "max-level-warn",
        feature = "max-level-mile",
        feature = "max-level-info",
        feature = "max-level-trace",
        feature = "max-level-debug0",
        feature = "max-level-debug1",
        feature = "max-level-debug2",
        feature = "max-level-debug3",
    )),
))]
#[macro_export]
macro_rules! info {
    ($($args:tt)*) => {
        $crate::ulog!(Info, $($args)*)
    };
}

#[cfg(not(any(
    feature = "max-level-info",
    feature = "max-level-trace",
    feature = "max-level-debug0",
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    not(any(
        feature = "max-level-error",
        feature = "max-level-warn",
        feature = "max-level-mile",
        feature = "max-level-info",
        feature = "max-level-trace",
        feature = "max-level-debug0",
        feature = "max-level-debug1",
        feature = "max-level-debug2",
        feature = "max-level-debug3",
    )),
)))]
#[macro_export]
#[doc(hidden)]
macro_rules! info {
    ($($args:tt)*) => {
        ()
    };
}

/// Logs at `TRACE` severity.
#[cfg(any(
    feature = "max-level-trace",
    feature = "max-level-debug0",
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    all(
        not(any(
            feature = "max-level-error",
            feature = "max-level-warn",
            feature = "max-level-mile",
            feature = "max-level-info",
            feature = "max-level-trace",
            feature = "max-level-debug0",
            feature = "max-level-debug1",
            feature = "max-level-debug2",
            feature = "max-level-debug3",
        )),
        debug_assertions,
    ),
))]
#[macro_export]
macro_rules! trace {
    ($($args:tt)*) => {
        $crate::ulog!(Trace, $($args)*)
    };
}

#[cfg(not(any(
    feature = "max-level-trace",
    feature = "max-level-debug0",
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    all(
        not(any(
            feature = "max-level-error",
            feature = "max-level-warn",
            feature = "max-level-mile",
            feature = "max-level-info",
            feature = "max-level-trace",
            feature = "max-level-debug0",
            feature = "max-level-debug1",
            feature = "max-level-debug2",
            feature = "max-level-debug3",
        )),
        debug_assertions,
    ),
)))]
#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($($args:tt)*) => {
        ()
    };
}

/// Logs at `DEBUG0` severity.
#[cfg(any(
    feature = "max-level-debug0",
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    all(
        not(any(
            feature = "max-level-error",
            feature = "max-level-warn",
            feature = "max-level-mile",
            feature = "max-level-info",
            feature = "max-level-trace",
            feature = "max-level-debug0",
            feature = "max-level-debug1",
            feature = "max-level-debug2",
            feature = "max-level-debug3",
        )),
        debug_assertions,
    ),
))]
#[macro_export]
macro_rules! debug0 {
    ($($args:tt)*) => {
        $crate::ulog!(Debug0, $($args)*)
    };
}

#[cfg(not(any(
    feature = "max-level-debug0",
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    all(
        not(any(
            feature = "max-level-error",
            feature = "max-level-warn",
            feature = "max-level-mile",
            feature = "max-level-info",
            feature = "max-level-trace",
            feature = "max-level-debug0",
            feature = "max-level-debug1",
            feature = "max-level-debug2",
            feature = "max-level-debug3",
        )),
        debug_assertions,
    ),
)))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug0 {
    ($($args:tt)*) => {
        ()
    };
}

/// Logs at `DEBUG1` severity.
#[cfg(any(
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    all(
        not(any(
            feature = "max-level-error",
            feature = "max-level-warn",
            feature = "max-level-mile",
            feature = "max-level-info",
            feature = "max-level-trace",
            feature = "max-level-debug0",
            feature = "max-level-debug1",
            feature = "max-level-debug2",
            feature = "max-level-debug3",
        )),
        debug_assertions,
    ),
))]
#[macro_export]
macro_rules! debug1 {
    ($($args:tt)*) => {
        $crate::ulog!(Debug1, $($args)*)
    };
}

#[cfg(not(any(
    feature = "max-level-debug1",
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    all(
        not(any(
            feature = "max-level-error",
            feature = "max-level-warn",
            feature = "max-level-mile",
            feature = "max-level-info",
            feature = "max-level-trace",
            feature = "max-level-debug0",
            feature = "max-level-debug1",
            feature = "max-level-debug2",
            feature = "max-level-debug3",
        )),
        debug_assertions,
    ),
)))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug1 {
    ($($args:tt)*) => {
        ()
    };
}

/// Logs at `DEBUG2` severity.
#[cfg(any(
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    all(
        not(any(
            feature = "max-level-error",
            feature = "max-level-warn",
            feature = "max-level-mile",
            feature = "max-level-info",
            feature = "max-level-trace",
            feature = "max-level-debug0",
            feature = "max-level-debug1",
            feature = "max-level-debug2",
            feature = "max-level-debug3",
        )),
        debug_assertions,
    ),
))]
#[macro_export]
macro_rules! debug2 {
    ($($args:tt)*) => {
        $crate::ulog!(Debug2, $($args)*)
    };
}

#[cfg(not(any(
    feature = "max-level-debug2",
    feature = "max-level-debug3",
    all(
        not(any(
            feature = "max-level-error",
            feature = "max-level-warn",
            feature = "max-level-mile",
            feature = "max-level-info",
            feature = "max-level-trace",
            feature = "max-level-debug0",
            feature = "max-level-debug1",
            feature = "max-level-debug2",
            feature = "max-level-debug3",
        )),
        debug_assertions,
    ),
)))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug2 {
    ($($args:tt)*) => {
        ()
    };
}

/// Logs at `DEBUG3` severity.
#[cfg(any(
    feature = "max-level-debug3",
    all(
        not(any(
            feature = "max-level-error",
            feature = "max-level-warn",
            feature = "max-level-mile",
            feature = "max-level-info",
            feature = "max-level-trace",
            feature = "max-level-debug0",
            feature = "max-level-debug1",
            feature = "max-level-debug2",
            feature = "max-level-debug3",
        )),
        debug_assertions,
    ),
))]
#[macro_export]
macro_rules! debug3 {
    ($($args:tt)*) => {
        $crate::ulog!(Debug3, $($args)*)
    };
}

#[cfg(not(any(
    feature = "max-level-debug3",
    all(
        not(any(
            feature = "max-level-error",
            feature = "max-level-warn",
            feature = "max-level-mile",
            feature = "max-level-info",
            feature = "max-level-trace",
            feature = "max-level-debug0",
            feature = "max-level-debug1",
            feature = "max-level-debug2",
            feature = "max-level-debug3",
        )),
        debug_assertions,
    ),
)))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug3 {
    ($($args:tt)*) => {
        ()
    };
}
