//! Codec configuration that callers can serialize/deserialize.
//!
//! The core never reads the environment; binaries build this and pass it in.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireConfig {
    /// Largest message a decoder will accept.
    pub max_message_bytes: usize,

    /// Largest payload type URL a decoder will accept.
    pub max_type_url_bytes: usize,

    /// Largest payload blob a decoder will accept.
    pub max_context_bytes: usize,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_message_bytes: 64 * 1024,
            max_type_url_bytes: 256,
            max_context_bytes: 4 * 1024 * 1024, // 4 MiB
        }
    }
}

impl WireConfig {
    /// Reject `len` if it exceeds `max`. Keeps corrupt headers from driving
    /// large allocations.
    pub fn check(&self, field: &'static str, len: usize, max: usize) -> Result<()> {
        if len > max {
            return Err(Error::TooLarge { field, len, max });
        }
        Ok(())
    }
}
