//! Rendering statuses for operators and peers.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use pstatus_core::{PayloadRegistry, Status};
use pstatus_planner::CompilerErrorGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `<CODE>: <message>` plus any resolvable payload.
    Text,
    /// The JSON wire form.
    Json,
    /// The binary wire frame, hex-encoded.
    Frame,
}

pub fn registry() -> PayloadRegistry {
    let mut reg = PayloadRegistry::new();
    pstatus_planner::register_payloads(&mut reg);
    reg
}

pub fn render(status: &Status, format: Format, registry: &PayloadRegistry) -> Result<String> {
    Ok(match format {
        Format::Text => render_text(status, registry),
        Format::Json => status.to_wire().to_json()?,
        Format::Frame => hex::encode(status.to_wire().encode_frame()),
    })
}

fn render_text(status: &Status, registry: &PayloadRegistry) -> String {
    let mut out = status.to_string();
    let Some(payload) = status.payload() else {
        return out;
    };

    match registry.resolve(payload) {
        Ok(Some(resolved)) => match resolved.downcast_ref::<CompilerErrorGroup>() {
            Some(group) => {
                for e in &group.errors {
                    let _ = write!(out, "\n  {e}");
                }
            }
            None => {
                let _ = write!(out, "\n  {resolved:?}");
            }
        },
        Ok(None) => {
            let _ = write!(
                out,
                "\n  context: {} ({} bytes, unresolved)",
                payload.type_url(),
                payload.value().len()
            );
        }
        Err(e) => {
            let _ = write!(out, "\n  context: {} (undecodable: {e})", payload.type_url());
        }
    }
    out
}
