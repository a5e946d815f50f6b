//! Linear logical plans built by the YAML front end.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Int32,
    Int64,
    Float32,
    Float64,
    Utf8,
    Binary,
}

impl DataType {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "Boolean" | "bool" => DataType::Boolean,
            "Int32" | "i32" => DataType::Int32,
            "Int64" | "i64" => DataType::Int64,
            "Float32" | "f32" => DataType::Float32,
            "Float64" | "f64" => DataType::Float64,
            "Utf8" | "string" => DataType::Utf8,
            "Binary" | "bytes" => DataType::Binary,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalPlan {
    Scan {
        source: String,
        schema: Vec<Field>,
    },
    Filter {
        input: Box<LogicalPlan>,
        expr: String,
    },
    Project {
        input: Box<LogicalPlan>,
        columns: Vec<String>,
    },
    Map {
        input: Box<LogicalPlan>,
        expr: String,
    },
    Sink {
        input: Box<LogicalPlan>,
        destination: String,
        format: String,
    },
}

impl LogicalPlan {
    /// Number of operators from the scan up to and including this node.
    pub fn depth(&self) -> usize {
        match self {
            LogicalPlan::Scan { .. } => 1,
            LogicalPlan::Filter { input, .. }
            | LogicalPlan::Project { input, .. }
            | LogicalPlan::Map { input, .. }
            | LogicalPlan::Sink { input, .. } => 1 + input.depth(),
        }
    }
}
