//! Early-return on a failed status.
//!
//! `return_if_error!(expr)` evaluates `expr` once, adapts it, and returns the
//! failure from the enclosing function. The enclosing function may return a
//! `Status` or any `Result<T, E>` with `E: From<Status>`.
//!
//! Functions already returning `StatusOr<T>` can also just use
//! `status.into_result()?`.

use crate::status::Status;

/// How a function's return type is built from a failed `Status`.
pub trait FromStatus {
    fn from_status(status: Status) -> Self;
}

impl FromStatus for Status {
    #[inline]
    fn from_status(status: Status) -> Self {
        status
    }
}

impl<T, E: From<Status>> FromStatus for Result<T, E> {
    #[inline]
    fn from_status(status: Status) -> Self {
        Err(E::from(status))
    }
}

#[macro_export]
macro_rules! return_if_error {
    ($e:expr $(,)?) => {{
        let __status = $crate::adapter::adapt($e);
        if !__status.ok() {
            return $crate::propagate::FromStatus::from_status(__status);
        }
    }};
}
