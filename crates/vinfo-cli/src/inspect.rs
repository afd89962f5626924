//! # Inspection Subcommands
//!
//! Schema queries: presence maps, item types, and name/key resolution.

use anyhow::{Context, Result};
use clap::Args;

use vinfo_schema::SearchMethod;

use crate::message::print_map;
use crate::Manager;

/// Arguments for `presence`.
#[derive(Args, Debug)]
pub struct PresenceArgs {
    /// App-facing item names to request.
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Arguments for `type`.
#[derive(Args, Debug)]
pub struct TypeArgs {
    /// App-facing item name.
    pub name: String,
}

/// Arguments for `lookup`.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Resolve a head-unit key instead of an app-facing name.
    #[arg(long)]
    pub key: bool,

    /// Search nested struct members as well as root items.
    #[arg(long)]
    pub recursive: bool,

    /// Name or key to resolve.
    pub ident: String,
}

impl LookupArgs {
    fn method(&self) -> SearchMethod {
        if self.recursive {
            SearchMethod::Recursive
        } else {
            SearchMethod::NonRecursive
        }
    }
}

/// Print the presence map for the requested names.
pub fn run_presence(args: &PresenceArgs, manager: &Manager) -> Result<u8> {
    print_map(manager.create_hmi_message_params(&args.names))?;
    Ok(0)
}

/// Print the type of an item; unknown names echo back unchanged.
pub fn run_type(args: &TypeArgs, manager: &Manager) -> Result<u8> {
    println!("{}", manager.vehicle_data_item_type(&args.name));
    Ok(0)
}

/// Print the resolved item as JSON. Exit code 1 when nothing matches.
pub fn run_lookup(args: &LookupArgs, manager: &Manager) -> Result<u8> {
    let Some(item) = manager.find_item(&args.ident, args.key, args.method()) else {
        let what = if args.key { "key" } else { "name" };
        println!("no schema item with {what} '{}'", args.ident);
        return Ok(1);
    };
    let rendered = serde_json::to_string_pretty(&item).context("failed to serialize item")?;
    println!("{rendered}");
    Ok(0)
}
