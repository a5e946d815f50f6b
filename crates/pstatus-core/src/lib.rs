#![forbid(unsafe_code)]
//! pstatus-core: the canonical `Status` value used as the return type of
//! fallible operations.
//!
//! This crate contains only *pure* types and small propagation helpers.
//! There is **no I/O**, **no environment access**, and **no async** here.
//!
//! Pieces:
//! - `code`: the closed set of canonical error kinds.
//! - `payload`: type-erased, strongly-typed error context plus a decode registry.
//! - `status`: the `Status` value itself (ok, or code + message + payload).
//! - `wire`: `WireStatus` and its JSON / binary frame encodings.
//! - `adapter`: `AdaptStatus`, the one place foreign errors become a `Status`.
//! - `propagate` / `check` / `testing`: early-return, fatal, and test idioms.

pub mod adapter;
pub mod check;
pub mod code;
pub mod config;
pub mod error;
pub mod payload;
pub mod prelude;
pub mod propagate;
pub mod status;
pub mod testing;
pub mod wire;

pub use adapter::{adapt, AdaptStatus};
pub use code::Code;
pub use payload::{Payload, PayloadMessage, PayloadRegistry, ResolvedPayload};
pub use status::{Status, StatusOr};
pub use wire::{WireContext, WireStatus};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
