//! CLI configuration: defaults, then environment, then command-line flags.

use pstatus_core::config::WireConfig;

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `pstatus_planner=debug`.
    pub log: String,

    /// Decode limits handed to the core codec.
    pub wire: WireConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log: "warn".to_string(),
            wire: WireConfig::default(),
        }
    }
}

impl CliConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `PSTATUS_LOG`: log filter directive
    /// - `PSTATUS_MAX_MESSAGE_BYTES`: largest accepted status message
    /// - `PSTATUS_MAX_TYPE_URL_BYTES`: largest accepted payload type URL
    /// - `PSTATUS_MAX_CONTEXT_BYTES`: largest accepted payload blob
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("PSTATUS_LOG") {
            cfg.log = s;
        }

        if let Some(v) = lookup("PSTATUS_MAX_MESSAGE_BYTES").and_then(|s| s.parse().ok()) {
            cfg.wire.max_message_bytes = v;
        }

        if let Some(v) = lookup("PSTATUS_MAX_TYPE_URL_BYTES").and_then(|s| s.parse().ok()) {
            cfg.wire.max_type_url_bytes = v;
        }

        if let Some(v) = lookup("PSTATUS_MAX_CONTEXT_BYTES").and_then(|s| s.parse().ok()) {
            cfg.wire.max_context_bytes = v;
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn env_overrides_defaults() {
        let env: HashMap<&str, &str> = [
            ("PSTATUS_LOG", "debug"),
            ("PSTATUS_MAX_MESSAGE_BYTES", "128"),
            ("PSTATUS_MAX_CONTEXT_BYTES", "not-a-number"),
        ]
        .into_iter()
        .collect();
        let cfg = CliConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.log, "debug");
        assert_eq!(cfg.wire.max_message_bytes, 128);
        // Unparseable values keep the default.
        assert_eq!(
            cfg.wire.max_context_bytes,
            WireConfig::default().max_context_bytes
        );
    }
}
