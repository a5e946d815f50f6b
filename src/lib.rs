#![forbid(unsafe_code)]
//! pstatus: canonical status values for fallible operations.
//!
//! Facade over the workspace crates:
//! - `pstatus-core`: `Status`, `Code`, payloads, wire codec, propagation idioms.
//! - `pstatus-planner`: a YAML pipeline front end that reports through `Status`.

pub use pstatus_core::*;
pub use pstatus_planner as planner;
