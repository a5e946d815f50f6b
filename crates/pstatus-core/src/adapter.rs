//! The single integration point for foreign error representations.
//!
//! Anything that wants to flow through `return_if_error!`, `check_ok!` or
//! `assert_ok!` implements `AdaptStatus`. There is no blanket fallback: a type
//! without an impl does not compile at the call site.

use crate::status::Status;
use crate::wire::WireStatus;

pub trait AdaptStatus {
    fn adapt(self) -> Status;
}

/// Normalize `v` into a `Status`.
#[inline]
pub fn adapt<V: AdaptStatus>(v: V) -> Status {
    v.adapt()
}

impl AdaptStatus for Status {
    #[inline]
    fn adapt(self) -> Status {
        self
    }
}

impl AdaptStatus for &Status {
    #[inline]
    fn adapt(self) -> Status {
        self.clone()
    }
}

impl AdaptStatus for WireStatus {
    fn adapt(self) -> Status {
        Status::from(self)
    }
}

impl AdaptStatus for &WireStatus {
    fn adapt(self) -> Status {
        Status::from_wire(self)
    }
}

/// `Ok` adapts to the ok status; `Err` adapts its error. The value is dropped.
impl<T, E: AdaptStatus> AdaptStatus for Result<T, E> {
    fn adapt(self) -> Status {
        match self {
            Ok(_) => Status::ok_status(),
            Err(e) => e.adapt(),
        }
    }
}

impl<'a, T, E> AdaptStatus for &'a Result<T, E>
where
    &'a E: AdaptStatus,
{
    fn adapt(self) -> Status {
        match self {
            Ok(_) => Status::ok_status(),
            Err(e) => e.adapt(),
        }
    }
}
