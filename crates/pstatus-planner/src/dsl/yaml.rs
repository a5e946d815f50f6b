//! Minimal YAML → LogicalPlan parser for *linear* pipelines.
//!
//! Example:
//! ```yaml
//! steps:
//!   - op: scan
//!     source: "data/logs.csv"
//!     schema:
//!       - { name: "ts",  type: "Utf8" }
//!       - { name: "uid", type: "Utf8" }
//!       - { name: "lat", type: "Float64", nullable: true }
//!   - op: filter
//!     expr: "uid != ''"
//!   - op: project
//!     columns: ["ts", "uid"]
//!   - op: sink
//!     destination: "out/filtered.csv"
//!     format: "csv"
//! ```
//!
//! Structural checks run over every step and all violations are reported
//! together rather than stopping at the first.

use pstatus_core::{adapt, return_if_error, Status, StatusOr};
use serde::{Deserialize, Serialize};

use crate::compiler::StepError;
use crate::error::{Error, Result};
use crate::logical::{DataType, Field, LogicalPlan as L};

pub const SINK_FORMATS: &[&str] = &["csv", "jsonl", "parquet"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "op")]
pub enum Step {
    Scan {
        source: String,
        schema: Vec<FieldDef>,
    },
    Filter {
        expr: String,
    },
    Project {
        columns: Vec<String>,
    },
    Map {
        expr: String,
    },
    Sink {
        destination: String,
        format: String,
    },
}

impl Step {
    fn op(&self) -> &'static str {
        match self {
            Step::Scan { .. } => "scan",
            Step::Filter { .. } => "filter",
            Step::Project { .. } => "project",
            Step::Map { .. } => "map",
            Step::Sink { .. } => "sink",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Debug, Clone)]
pub struct ParsedPipeline {
    pub name: Option<String>,
    pub plan: L,
}

/// Parse YAML source into a `LogicalPlan`.
///
/// Failures come back as `INVALID_ARGUMENT`; syntax and structural problems
/// carry a `CompilerErrorGroup` payload.
pub fn parse_yaml_pipeline(yaml_src: &str) -> StatusOr<ParsedPipeline> {
    let parsed = parse_inner(yaml_src).map_err(adapt);
    match &parsed {
        Ok(p) => tracing::debug!(depth = p.plan.depth(), "pipeline compiled"),
        Err(status) => tracing::debug!(%status, "pipeline rejected"),
    }
    parsed
}

/// Status-only form of `parse_yaml_pipeline` for callers that need no plan.
pub fn validate_pipeline(yaml_src: &str) -> Status {
    return_if_error!(parse_yaml_pipeline(yaml_src));
    Status::ok_status()
}

fn parse_inner(yaml_src: &str) -> Result<ParsedPipeline> {
    if yaml_src.trim().is_empty() {
        return Err(Error::Empty);
    }
    let doc: Pipeline = serde_yaml::from_str(yaml_src)?;
    if doc.steps.is_empty() {
        return Err(Error::NoSteps);
    }

    let mut errors = Vec::new();
    let mut cur: Option<L> = None;
    let mut sink_at: Option<usize> = None;

    for (index, step) in doc.steps.into_iter().enumerate() {
        let mut fail = |message: String| errors.push(StepError { index, message });

        if let Some(at) = sink_at {
            fail(format!("'{}' follows the sink at step {at}", step.op()));
            continue;
        }

        cur = match (step, cur.take()) {
            (Step::Scan { source, schema }, None) => {
                let mut fields = Vec::with_capacity(schema.len());
                for f in schema {
                    match DataType::parse(&f.data_type) {
                        Some(data_type) => fields.push(Field {
                            name: f.name,
                            data_type,
                            nullable: f.nullable,
                        }),
                        None => fail(format!(
                            "unknown type '{}' for field '{}'",
                            f.data_type, f.name
                        )),
                    }
                }
                Some(L::Scan {
                    source,
                    schema: fields,
                })
            }
            (Step::Scan { .. }, Some(input)) => {
                fail("multiple scans not supported".into());
                Some(input)
            }
            (s, None) if index == 0 => {
                fail(format!("first step must be 'scan', got '{}'", s.op()));
                None
            }
            // Already reported at step 0.
            (_, None) => None,
            (Step::Filter { expr }, Some(input)) => Some(L::Filter {
                input: Box::new(input),
                expr,
            }),
            (Step::Project { columns }, Some(input)) => {
                if columns.is_empty() {
                    fail("project needs at least one column".into());
                }
                Some(L::Project {
                    input: Box::new(input),
                    columns,
                })
            }
            (Step::Map { expr }, Some(input)) => Some(L::Map {
                input: Box::new(input),
                expr,
            }),
            (
                Step::Sink {
                    destination,
                    format,
                },
                Some(input),
            ) => {
                if !SINK_FORMATS.contains(&format.as_str()) {
                    fail(format!("unsupported sink format '{format}'"));
                }
                sink_at = Some(index);
                Some(L::Sink {
                    input: Box::new(input),
                    destination,
                    format,
                })
            }
        };
    }

    match cur {
        Some(plan) if errors.is_empty() => Ok(ParsedPipeline {
            name: doc.name,
            plan,
        }),
        _ => Err(Error::Structure(errors)),
    }
}
