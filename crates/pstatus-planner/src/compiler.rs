//! Typed compiler diagnostics carried as `Status` payloads.

use std::fmt;

use pstatus_core::{PayloadMessage, PayloadRegistry};
use serde::{Deserialize, Serialize};

/// A syntax error pinned to a source position. Line and column are 1-based;
/// 0 means the position is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineColError {
    pub line: u64,
    pub column: u64,
    pub message: String,
}

/// A structural error on the `index`-th pipeline step (0-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepError {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilerError {
    LineCol(LineColError),
    Step(StepError),
}

/// Every problem found in one compilation, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerErrorGroup {
    pub errors: Vec<CompilerError>,
}

impl PayloadMessage for CompilerErrorGroup {
    const TYPE_URL: &'static str = "pstatus.planner/CompilerErrorGroup";
}

/// Make the planner's payload types resolvable by `registry`.
pub fn register_payloads(registry: &mut PayloadRegistry) {
    registry.register::<CompilerErrorGroup>();
}

impl fmt::Display for CompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilerError::LineCol(e) => write!(f, "{}:{}: {}", e.line, e.column, e.message),
            CompilerError::Step(e) => write!(f, "step {}: {}", e.index, e.message),
        }
    }
}

impl fmt::Display for CompilerErrorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pstatus_core::Payload;

    #[test]
    fn test_group_resolves_through_registry() {
        let group = CompilerErrorGroup {
            errors: vec![
                CompilerError::LineCol(LineColError {
                    line: 2,
                    column: 5,
                    message: "SyntaxError: bad indent".into(),
                }),
                CompilerError::Step(StepError {
                    index: 1,
                    message: "unsupported sink format 'xml'".into(),
                }),
            ],
        };
        let payload = Payload::pack(&group).unwrap();

        let mut reg = PayloadRegistry::new();
        register_payloads(&mut reg);
        let resolved = reg.resolve(&payload).unwrap().expect("registered");
        assert_eq!(resolved.downcast_ref::<CompilerErrorGroup>(), Some(&group));
        assert_eq!(
            group.to_string(),
            "2:5: SyntaxError: bad indent\nstep 1: unsupported sink format 'xml'"
        );
    }
}
