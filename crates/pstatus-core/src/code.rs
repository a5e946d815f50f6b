//! Canonical error kinds.
//!
//! The numeric values are part of the wire contract and must never change.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! codes {
    ($($(#[$doc:meta])* $variant:ident = $value:literal => $name:literal,)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(i32)]
        pub enum Code {
            $(
                $(#[$doc])*
                #[serde(rename = $name)]
                $variant = $value,
            )+
        }

        impl Code {
            /// Every code, in numeric order.
            pub const ALL: &'static [Code] = &[$(Code::$variant,)+];

            /// Canonical upper-snake name, e.g. `INVALID_ARGUMENT`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Code::$variant => $name,)+
                }
            }

            pub const fn from_i32(v: i32) -> Option<Self> {
                match v {
                    $($value => Some(Code::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

codes! {
    Ok = 0 => "OK",
    Cancelled = 1 => "CANCELLED",
    Unknown = 2 => "UNKNOWN",
    InvalidArgument = 3 => "INVALID_ARGUMENT",
    DeadlineExceeded = 4 => "DEADLINE_EXCEEDED",
    NotFound = 5 => "NOT_FOUND",
    AlreadyExists = 6 => "ALREADY_EXISTS",
    PermissionDenied = 7 => "PERMISSION_DENIED",
    ResourceExhausted = 8 => "RESOURCE_EXHAUSTED",
    FailedPrecondition = 9 => "FAILED_PRECONDITION",
    Aborted = 10 => "ABORTED",
    OutOfRange = 11 => "OUT_OF_RANGE",
    Unimplemented = 12 => "UNIMPLEMENTED",
    Internal = 13 => "INTERNAL",
    Unavailable = 14 => "UNAVAILABLE",
    DataLoss = 15 => "DATA_LOSS",
    /// Missing or invalid credentials (distinct from `PermissionDenied`).
    Unauthenticated = 16 => "UNAUTHENTICATED",
}

impl Code {
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Code::Ok)
    }
}

impl Default for Code {
    fn default() -> Self {
        Code::Ok
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for Code {
    type Error = crate::error::Error;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        Code::from_i32(v).ok_or(crate::error::Error::UnknownCode(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values_are_stable() {
        assert_eq!(Code::Ok.as_i32(), 0);
        assert_eq!(Code::InvalidArgument.as_i32(), 3);
        assert_eq!(Code::NotFound.as_i32(), 5);
        assert_eq!(Code::Internal.as_i32(), 13);
        assert_eq!(Code::Unauthenticated.as_i32(), 16);
        assert_eq!(Code::ALL.len(), 17);
    }

    #[test]
    fn test_from_i32_matches_as_i32() {
        for code in Code::ALL {
            assert_eq!(Code::from_i32(code.as_i32()), Some(*code));
        }
        assert_eq!(Code::from_i32(17), None);
        assert_eq!(Code::from_i32(-1), None);
        assert!(Code::try_from(99).is_err());
    }

    #[test]
    fn test_names_and_serde() {
        assert_eq!(Code::DeadlineExceeded.to_string(), "DEADLINE_EXCEEDED");
        let json = serde_json::to_string(&Code::FailedPrecondition).unwrap();
        assert_eq!(json, "\"FAILED_PRECONDITION\"");
        let back: Code = serde_json::from_str("\"DATA_LOSS\"").unwrap();
        assert_eq!(back, Code::DataLoss);
    }
}
