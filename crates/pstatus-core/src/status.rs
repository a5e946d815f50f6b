//! The canonical result value.
//!
//! A `Status` is either ok or carries a `Code`, a message, and an optional
//! `Payload`. The ok case is a null box, so checking it costs one pointer
//! comparison and moving it costs one word.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code::Code;
use crate::payload::{Payload, PayloadMessage};

/// Result alias for operations that produce a value or a failed `Status`.
pub type StatusOr<T> = std::result::Result<T, Status>;

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(from = "crate::wire::WireStatus", into = "crate::wire::WireStatus")]
#[must_use]
pub struct Status {
    // None iff ok.
    state: Option<Box<State>>,
}

#[derive(Clone)]
struct State {
    code: Code,
    msg: String,
    payload: Option<Payload>,
}

macro_rules! code_ctor {
    ($($fn_name:ident => $code:ident,)+) => {
        $(
            #[doc = concat!("Shorthand for `Status::new(Code::", stringify!($code), ", msg)`.")]
            pub fn $fn_name(msg: impl Into<String>) -> Self {
                Self::new(Code::$code, msg)
            }
        )+
    };
}

impl Status {
    /// The success status. Same as `Status::default()`.
    pub const fn ok_status() -> Self {
        Self { state: None }
    }

    /// Build a status from a code and message.
    ///
    /// `Code::Ok` always yields the ok status; the message is dropped.
    pub fn new(code: Code, msg: impl Into<String>) -> Self {
        Self::build(code, msg.into(), None)
    }

    /// Build a failed status carrying an already-packed payload.
    pub fn with_payload(code: Code, msg: impl Into<String>, payload: Payload) -> Self {
        Self::build(code, msg.into(), Some(payload))
    }

    /// Build a failed status carrying `ctx` as its payload.
    pub fn with_context<T: PayloadMessage>(
        code: Code,
        msg: impl Into<String>,
        ctx: &T,
    ) -> crate::error::Result<Self> {
        Ok(Self::with_payload(code, msg, Payload::pack(ctx)?))
    }

    fn build(code: Code, msg: String, payload: Option<Payload>) -> Self {
        if code.is_ok() {
            return Self::ok_status();
        }
        Self {
            state: Some(Box::new(State { code, msg, payload })),
        }
    }

    code_ctor! {
        cancelled => Cancelled,
        unknown => Unknown,
        invalid_argument => InvalidArgument,
        deadline_exceeded => DeadlineExceeded,
        not_found => NotFound,
        already_exists => AlreadyExists,
        permission_denied => PermissionDenied,
        resource_exhausted => ResourceExhausted,
        failed_precondition => FailedPrecondition,
        aborted => Aborted,
        out_of_range => OutOfRange,
        unimplemented => Unimplemented,
        internal => Internal,
        unavailable => Unavailable,
        data_loss => DataLoss,
        unauthenticated => Unauthenticated,
    }

    #[inline]
    pub fn ok(&self) -> bool {
        self.state.is_none()
    }

    pub fn code(&self) -> Code {
        self.state.as_ref().map_or(Code::Ok, |s| s.code)
    }

    /// The message, or `""` when ok.
    pub fn message(&self) -> &str {
        self.state.as_ref().map_or("", |s| s.msg.as_str())
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.state.as_ref().and_then(|s| s.payload.as_ref())
    }

    pub fn has_payload(&self) -> bool {
        self.payload().is_some()
    }

    /// Decode the payload as `T`; `None` if absent, of another type, or corrupt.
    pub fn context<T: PayloadMessage>(&self) -> Option<T> {
        self.payload().and_then(|p| p.unpack::<T>().ok().flatten())
    }

    /// `Ok(())` when ok, `Err(self)` otherwise, for use with `?`.
    pub fn into_result(self) -> StatusOr<()> {
        if self.ok() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub(crate) fn into_parts(self) -> Option<(Code, String, Option<Payload>)> {
        self.state.map(|s| {
            let State { code, msg, payload } = *s;
            (code, msg, payload)
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            None => f.write_str("OK"),
            Some(s) => write!(f, "{}: {}", s.code, s.msg),
        }
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            None => f.write_str("Status(OK)"),
            Some(s) => f
                .debug_struct("Status")
                .field("code", &s.code)
                .field("msg", &s.msg)
                .field("payload", &s.payload)
                .finish(),
        }
    }
}

/// Equal iff both ok, or both failed with the same rendering. The payload
/// does not take part.
impl PartialEq for Status {
    fn eq(&self, other: &Self) -> bool {
        match (&self.state, &other.state) {
            (None, None) => true,
            (Some(a), Some(b)) => a.code == b.code && a.msg == b.msg,
            _ => false,
        }
    }
}

impl Eq for Status {}

impl std::error::Error for Status {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Detail {
        field: String,
    }

    impl PayloadMessage for Detail {
        const TYPE_URL: &'static str = "test/Detail";
    }

    #[test]
    fn test_default_is_ok() {
        let s = Status::default();
        assert!(s.ok());
        assert_eq!(s.code(), Code::Ok);
        assert_eq!(s.message(), "");
        assert!(s.payload().is_none());
        assert_eq!(s.to_string(), "OK");
        assert_eq!(s, Status::ok_status());
    }

    #[test]
    fn test_ok_is_pointer_sized() {
        assert_eq!(std::mem::size_of::<Status>(), std::mem::size_of::<usize>());
    }

    #[test]
    fn test_code_and_message_read_back() {
        for code in Code::ALL.iter().copied().filter(|c| !c.is_ok()) {
            let s = Status::new(code, format!("msg for {code}"));
            assert!(!s.ok());
            assert_eq!(s.code(), code);
            assert_eq!(s.message(), format!("msg for {code}"));
            assert!(s.payload().is_none());
        }
    }

    #[test]
    fn test_ok_code_normalizes_to_ok() {
        let s = Status::new(Code::Ok, "ignored");
        assert!(s.ok());
        assert_eq!(s.message(), "");

        let p = Payload::pack(&Detail { field: "f".into() }).unwrap();
        let s = Status::with_payload(Code::Ok, "ignored", p);
        assert!(s.ok());
        assert!(s.payload().is_none());
    }

    #[test]
    fn test_display_format() {
        let s = Status::invalid_argument("bad x");
        assert_eq!(s.to_string(), "INVALID_ARGUMENT: bad x");
        assert_eq!(Status::not_found("").to_string(), "NOT_FOUND: ");
    }

    #[test]
    fn test_equality() {
        assert_eq!(
            Status::new(Code::InvalidArgument, "bad x"),
            Status::new(Code::InvalidArgument, "bad x")
        );
        assert_ne!(
            Status::new(Code::InvalidArgument, "bad x"),
            Status::new(Code::NotFound, "bad x")
        );
        assert_ne!(Status::ok_status(), Status::internal(""));
    }

    #[test]
    fn test_equality_ignores_payload() {
        let with = Status::with_context(Code::Aborted, "m", &Detail { field: "a".into() }).unwrap();
        let without = Status::aborted("m");
        assert_eq!(with, without);
    }

    #[test]
    fn test_clone_is_independent() {
        let s = Status::with_context(Code::InvalidArgument, "bad", &Detail { field: "x".into() })
            .unwrap();
        let mut copy = s.clone();
        assert_eq!(copy, s);

        let (a, b) = (s.payload().unwrap(), copy.payload().unwrap());
        assert!(!std::ptr::eq(a, b));
        assert_ne!(a.value().as_ptr(), b.value().as_ptr());
        assert_eq!(a, b);

        copy = Status::not_found("other");
        assert_eq!(s.code(), Code::InvalidArgument);
        assert_eq!(s.message(), "bad");
        assert_eq!(s.context::<Detail>(), Some(Detail { field: "x".into() }));
        assert_eq!(copy.code(), Code::NotFound);
    }

    #[test]
    fn test_into_result() {
        assert!(Status::ok_status().into_result().is_ok());
        let err = Status::unavailable("down").into_result().unwrap_err();
        assert_eq!(err.code(), Code::Unavailable);
    }

    #[test]
    fn test_status_crosses_threads_by_copy() {
        let s = Status::data_loss("torn write");
        let copy = s.clone();
        let handle = std::thread::spawn(move || copy.to_string());
        assert_eq!(handle.join().unwrap(), s.to_string());
    }
}
