#![forbid(unsafe_code)]
//! pstatus-planner: YAML query pipelines → `LogicalPlan`, with every failure
//! reported as a `Status`.
//!
//! Syntax errors carry their source location and structural errors carry the
//! offending step index, both inside a `CompilerErrorGroup` payload attached
//! to an `INVALID_ARGUMENT` status. Receivers that want to inspect the group
//! call `register_payloads` on their `PayloadRegistry`.

pub mod compiler;
pub mod dsl;
pub mod error;
pub mod logical;

pub use compiler::{register_payloads, CompilerError, CompilerErrorGroup, LineColError, StepError};
pub use dsl::yaml::{parse_yaml_pipeline, validate_pipeline, ParsedPipeline};
pub use logical::LogicalPlan;
