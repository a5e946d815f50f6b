//! pstatus CLI: compile pipelines and inspect wire-form statuses.
//!
//! Exit codes: 0 when the status is OK, 1 when it is not, 2 when the input
//! could not be read or decoded at all.

mod config;
mod render;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pstatus_core::{Status, WireStatus};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::render::{registry, render, Format};

#[derive(Parser)]
#[command(name = "pstatus")]
#[command(about = "Compile query pipelines and render canonical statuses", long_about = None)]
struct Cli {
    /// Log filter (overrides PSTATUS_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a pipeline YAML file and print the resulting status
    Check {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Decode a wire-form status and print it
    Decode {
        /// File holding the JSON wire form (or a hex frame with --frame)
        #[arg(short, long)]
        input: PathBuf,

        /// Input is a hex-encoded binary frame
        #[arg(long)]
        frame: bool,

        /// Largest accepted message in bytes (overrides config)
        #[arg(long)]
        max_message_bytes: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = CliConfig::from_env();
    if let Some(log) = cli.log {
        config.log = log;
    }
    init_tracing(&config.log);

    let outcome = match cli.command {
        Commands::Check { pipeline, format } => check_pipeline(&pipeline, format),
        Commands::Decode {
            input,
            frame,
            max_message_bytes,
            format,
        } => {
            if let Some(max) = max_message_bytes {
                config.wire.max_message_bytes = max;
            }
            decode_status(&input, frame, format, &config)
        }
    };

    match outcome {
        Ok(status) if status.ok() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn check_pipeline(path: &Path, format: Format) -> Result<Status> {
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("reading pipeline {}", path.display()))?;
    let status = pstatus_planner::validate_pipeline(&yaml);
    println!("{}", render(&status, format, &registry())?);
    Ok(status)
}

fn decode_status(path: &Path, frame: bool, format: Format, config: &CliConfig) -> Result<Status> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading input {}", path.display()))?;
    let wire = if frame {
        let bytes = hex::decode(raw.trim()).context("frame is not valid hex")?;
        WireStatus::decode_frame(&bytes, &config.wire)?
    } else {
        WireStatus::from_json(&raw)?
    };
    let reg = registry();
    let status = Status::from_wire_checked(&wire, &reg)?;
    println!("{}", render(&status, format, &reg)?);
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pstatus_core::Code;

    /// Scratch file removed on drop, including when the test fails.
    struct TempFile(PathBuf);

    impl TempFile {
        fn new(name: &str, contents: &str) -> Self {
            let mut path = std::env::temp_dir();
            path.push(format!("pstatus-cli-tests-{}-{name}", std::process::id()));
            fs::write(&path, contents).unwrap();
            Self(path)
        }

        fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    #[test]
    fn decode_json_wire_form() {
        let file = TempFile::new("nf.json", r#"{"code":5,"message":"pod missing"}"#);
        let s = decode_status(file.path(), false, Format::Text, &CliConfig::default()).unwrap();
        assert_eq!(s, Status::new(Code::NotFound, "pod missing"));
    }

    #[test]
    fn decode_hex_frame_respects_limits() {
        let frame = hex::encode(WireStatus::new(Code::Internal, "0123456789").encode_frame());
        let file = TempFile::new("frame.hex", &frame);
        let path = file.path();

        let s = decode_status(path, true, Format::Json, &CliConfig::default()).unwrap();
        assert_eq!(s.code(), Code::Internal);

        let mut tight = CliConfig::default();
        tight.wire.max_message_bytes = 4;
        assert!(decode_status(path, true, Format::Text, &tight).is_err());
    }

    #[test]
    fn check_reports_invalid_pipeline() {
        let file = TempFile::new("bad.yaml", "steps:\n  - op: map\n    expr: x\n");
        let s = check_pipeline(file.path(), Format::Text).unwrap();
        assert_eq!(s.code(), Code::InvalidArgument);
    }

    #[test]
    fn scratch_files_are_removed() {
        let path = {
            let file = TempFile::new("gone.json", "{}");
            assert!(file.path().exists());
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
