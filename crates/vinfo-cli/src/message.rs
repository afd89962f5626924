//! # Message Subcommands
//!
//! `validate`, `canonicalize` and `to-head-unit` all read one message
//! parameter document (JSON or YAML) and run it through the engine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Map, Value};

use vinfo_schema::load_message_file;

use crate::Manager;

/// Arguments shared by the message subcommands.
#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Path to the message parameters (JSON or YAML).
    pub message: PathBuf,
}

/// Validate a message. Exit code 0 when valid, 1 otherwise.
pub fn run_validate(args: &MessageArgs, manager: &Manager) -> Result<u8> {
    let message = read_message(&args.message)?;
    match manager.validate_vehicle_data_items(&message) {
        Ok(()) => {
            println!("OK: {}", args.message.display());
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {}", args.message.display());
            println!("  kind: {:?}", e.kind());
            println!("  path: {}", e.path());
            println!("  {e}");
            Ok(1)
        }
    }
}

/// Print the app-facing form of head-unit parameters.
pub fn run_canonicalize(args: &MessageArgs, manager: &Manager) -> Result<u8> {
    let params = read_params(&args.message)?;
    print_map(manager.create_mobile_message_params(&params))?;
    Ok(0)
}

/// Print the head-unit-facing form of app parameters.
pub fn run_to_head_unit(args: &MessageArgs, manager: &Manager) -> Result<u8> {
    let params = read_params(&args.message)?;
    print_map(manager.create_hmi_data_params(&params))?;
    Ok(0)
}

fn read_message(path: &Path) -> Result<Value> {
    load_message_file(path).with_context(|| format!("failed to read message: {}", path.display()))
}

fn read_params(path: &Path) -> Result<Map<String, Value>> {
    match read_message(path)? {
        Value::Object(params) => Ok(params),
        other => anyhow::bail!(
            "message {} must be a map of parameters, got {}",
            path.display(),
            vinfo_core::ValueKind::of(&other)
        ),
    }
}

pub(crate) fn print_map(map: Map<String, Value>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(&Value::Object(map))
        .context("failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}
