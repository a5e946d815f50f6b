//! Assertion helpers for tests.
//!
//! The failure message always carries the full rendering of the status so a
//! failing test explains itself.

use crate::adapter::AdaptStatus;

/// `Ok(())` if `v` adapts to ok, otherwise `Err` with the status rendering.
pub fn is_ok<V: AdaptStatus>(v: V) -> Result<(), String> {
    let status = v.adapt();
    if status.ok() {
        Ok(())
    } else {
        Err(status.to_string())
    }
}

#[macro_export]
macro_rules! assert_ok {
    ($e:expr $(,)?) => {
        if let ::std::result::Result::Err(rendered) = $crate::testing::is_ok($e) {
            ::std::panic!("expected OK status, got {}", rendered);
        }
    };
}

#[macro_export]
macro_rules! assert_not_ok {
    ($e:expr $(,)?) => {
        if $crate::testing::is_ok($e).is_ok() {
            ::std::panic!("expected a non-OK status, got OK");
        }
    };
}

#[cfg(test)]
mod tests {
    use super::is_ok;
    use crate::code::Code;
    use crate::status::{Status, StatusOr};
    use crate::wire::WireStatus;

    #[test]
    fn test_predicate() {
        assert_eq!(is_ok(Status::ok_status()), Ok(()));
        assert_eq!(
            is_ok(Status::permission_denied("no")),
            Err("PERMISSION_DENIED: no".to_string())
        );
        assert!(is_ok(WireStatus::default()).is_ok());
    }

    #[test]
    fn test_macros_accept_adaptable_values() {
        crate::assert_ok!(Status::ok_status());
        crate::assert_ok!(StatusOr::Ok(1));
        crate::assert_not_ok!(WireStatus::new(Code::Aborted, "x"));
        crate::assert_not_ok!(&Status::cancelled("stop"));
    }

    #[test]
    #[should_panic(expected = "expected OK status, got RESOURCE_EXHAUSTED: quota")]
    fn test_assert_ok_reports_rendering() {
        crate::assert_ok!(Status::resource_exhausted("quota"));
    }
}
