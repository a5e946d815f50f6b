//! Convenient re-exports for downstream crates.

pub use crate::adapter::{adapt, AdaptStatus};
pub use crate::code::Code;
pub use crate::config::WireConfig;
pub use crate::payload::{Payload, PayloadMessage, PayloadRegistry, ResolvedPayload};
pub use crate::propagate::FromStatus;
pub use crate::status::{Status, StatusOr};
pub use crate::wire::{WireContext, WireStatus};
pub use crate::{assert_not_ok, assert_ok, check_ok, check_ok_prepend, dcheck_ok, return_if_error};
