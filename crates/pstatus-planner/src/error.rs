use pstatus_core::{AdaptStatus, Code, Status};
use thiserror::Error;

use crate::compiler::{CompilerError, CompilerErrorGroup, LineColError, StepError};

/// Result type local to pstatus-planner.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Query should not be empty.")]
    Empty,

    #[error("pipeline has no steps")]
    NoSteps,

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{} invalid step(s)", .0.len())]
    Structure(Vec<StepError>),
}

impl Error {
    fn error_group(&self) -> Option<CompilerErrorGroup> {
        match self {
            Error::Yaml(e) => {
                let (line, column) = e
                    .location()
                    .map_or((0, 0), |loc| (loc.line() as u64, loc.column() as u64));
                Some(CompilerErrorGroup {
                    errors: vec![CompilerError::LineCol(LineColError {
                        line,
                        column,
                        message: format!("SyntaxError: {e}"),
                    })],
                })
            }
            Error::Structure(steps) => Some(CompilerErrorGroup {
                errors: steps.iter().cloned().map(CompilerError::Step).collect(),
            }),
            Error::Empty | Error::NoSteps => None,
        }
    }
}

/// Compile errors become `INVALID_ARGUMENT`. Parse-level problems travel in
/// the payload with an empty message, so renderers show the group.
impl AdaptStatus for Error {
    fn adapt(self) -> Status {
        match self.error_group() {
            None => Status::invalid_argument(self.to_string()),
            Some(group) => Status::with_context(Code::InvalidArgument, "", &group)
                .unwrap_or_else(|e| Status::internal(format!("packing compiler errors: {e}"))),
        }
    }
}
