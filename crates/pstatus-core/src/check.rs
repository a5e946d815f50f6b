//! Fatal checks for statuses that must never fail.
//!
//! These are for invariant violations, not recoverable conditions: a failed
//! check logs the rendered status at `error` level, writes it to stderr and
//! aborts the process. Unwinding is not used, so a failure on a worker thread
//! or under `catch_unwind` still ends the process. This crate's own unit
//! tests panic instead so they can assert on the rendering.
//!
//! `dcheck_ok!` is active under `debug_assertions` or the `always-dcheck`
//! feature. Otherwise it still evaluates its operand, then discards it.

use crate::adapter::AdaptStatus;

/// Context used when a check has none of its own.
pub const DEFAULT_CONTEXT: &str = "Bad Status";

/// Abort with `"<context>: <status>"` unless `v` adapts to ok.
#[track_caller]
pub fn check_ok<V: AdaptStatus>(v: V, context: &str) {
    let status = v.adapt();
    if status.ok() {
        return;
    }
    let location = std::panic::Location::caller();
    tracing::error!(
        code = %status.code(),
        file = location.file(),
        line = location.line(),
        "{context}: {status}"
    );
    fail(&format!("{context}: {status}"));
}

#[cfg(not(test))]
fn fail(diagnostic: &str) -> ! {
    eprintln!("{diagnostic}");
    std::process::abort()
}

#[cfg(test)]
#[track_caller]
fn fail(diagnostic: &str) -> ! {
    panic!("{diagnostic}")
}

#[macro_export]
macro_rules! check_ok {
    ($e:expr $(,)?) => {
        $crate::check::check_ok($e, $crate::check::DEFAULT_CONTEXT)
    };
    ($e:expr, $($ctx:tt)+) => {
        $crate::check::check_ok($e, &::std::format!($($ctx)+))
    };
}

#[macro_export]
macro_rules! check_ok_prepend {
    ($e:expr, $ctx:expr $(,)?) => {
        $crate::check::check_ok($e, &$ctx)
    };
}

#[cfg(any(debug_assertions, feature = "always-dcheck"))]
#[macro_export]
macro_rules! dcheck_ok {
    ($($args:tt)+) => {
        $crate::check_ok!($($args)+)
    };
}

#[cfg(not(any(debug_assertions, feature = "always-dcheck")))]
#[macro_export]
macro_rules! dcheck_ok {
    ($e:expr $(, $($ctx:tt)*)?) => {{
        let _ = $crate::adapter::adapt($e);
    }};
}
