//! # vinfo CLI entry point
//!
//! Parses command-line arguments, loads the policy schema, and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vinfo_cli::inspect::{run_lookup, run_presence, run_type, LookupArgs, PresenceArgs, TypeArgs};
use vinfo_cli::message::{run_canonicalize, run_to_head_unit, run_validate, MessageArgs};
use vinfo_cli::open_manager;

/// Custom vehicle data schema tool.
///
/// Validates message parameters against the vehicle data schema of a
/// policy table and converts them between app-facing names and
/// head-unit-facing keys.
#[derive(Parser, Debug)]
#[command(name = "vinfo", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Policy file carrying the vehicle data schema (JSON or YAML).
    #[arg(long)]
    policy: PathBuf,

    /// Additional enum catalog merged over the base-spec enums.
    #[arg(long)]
    enums: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate message parameters against the schema.
    Validate(MessageArgs),

    /// Convert head-unit parameters to the app-facing form.
    Canonicalize(MessageArgs),

    /// Convert app-facing parameters to the head-unit form.
    ToHeadUnit(MessageArgs),

    /// Build the head-unit presence map for item names.
    Presence(PresenceArgs),

    /// Print the type of a custom item.
    Type(TypeArgs),

    /// Resolve a name or key to its schema item.
    Lookup(LookupArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(policy = %cli.policy.display(), "vinfo starting");

    let result = open_manager(&cli.policy, cli.enums.as_deref()).and_then(|manager| {
        match &cli.command {
            Commands::Validate(args) => run_validate(args, &manager),
            Commands::Canonicalize(args) => run_canonicalize(args, &manager),
            Commands::ToHeadUnit(args) => run_to_head_unit(args, &manager),
            Commands::Presence(args) => run_presence(args, &manager),
            Commands::Type(args) => run_type(args, &manager),
            Commands::Lookup(args) => run_lookup(args, &manager),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_validate() {
        let cli = Cli::try_parse_from(["vinfo", "--policy", "pt.json", "validate", "m.json"]).unwrap();
        assert_eq!(cli.policy, PathBuf::from("pt.json"));
        assert!(cli.enums.is_none());
        match cli.command {
            Commands::Validate(args) => assert_eq!(args.message, PathBuf::from("m.json")),
            other => panic!("expected validate, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_to_head_unit_is_kebab_case() {
        let cli =
            Cli::try_parse_from(["vinfo", "--policy", "pt.json", "to-head-unit", "m.json"]).unwrap();
        assert!(matches!(cli.command, Commands::ToHeadUnit(_)));
    }

    #[test]
    fn cli_parse_canonicalize_with_enums() {
        let cli = Cli::try_parse_from([
            "vinfo",
            "--policy",
            "pt.yaml",
            "--enums",
            "enums.json",
            "canonicalize",
            "hmi.json",
        ])
        .unwrap();
        assert_eq!(cli.enums, Some(PathBuf::from("enums.json")));
        assert!(matches!(cli.command, Commands::Canonicalize(_)));
    }

    #[test]
    fn cli_parse_presence_names() {
        let cli = Cli::try_parse_from([
            "vinfo",
            "--policy",
            "pt.json",
            "presence",
            "climateData",
            "washerFluid",
        ])
        .unwrap();
        if let Commands::Presence(args) = cli.command {
            assert_eq!(args.names, vec!["climateData", "washerFluid"]);
        } else {
            panic!("expected presence");
        }
    }

    #[test]
    fn cli_parse_presence_requires_a_name() {
        assert!(Cli::try_parse_from(["vinfo", "--policy", "pt.json", "presence"]).is_err());
    }

    #[test]
    fn cli_parse_type() {
        let cli = Cli::try_parse_from(["vinfo", "--policy", "pt.json", "type", "climateData"]).unwrap();
        if let Commands::Type(args) = cli.command {
            assert_eq!(args.name, "climateData");
        } else {
            panic!("expected type");
        }
    }

    #[test]
    fn cli_parse_lookup_flags() {
        let cli = Cli::try_parse_from([
            "vinfo",
            "--policy",
            "pt.json",
            "lookup",
            "--key",
            "--recursive",
            "OEM_REF_FAN",
        ])
        .unwrap();
        if let Commands::Lookup(args) = cli.command {
            assert!(args.key);
            assert!(args.recursive);
            assert_eq!(args.ident, "OEM_REF_FAN");
        } else {
            panic!("expected lookup");
        }
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["vinfo", "--policy", "p", "type", "x"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["vinfo", "-vv", "--policy", "p", "type", "x"]).unwrap();
        assert_eq!(cli2.verbose, 2);

        let cli3 = Cli::try_parse_from(["vinfo", "--policy", "p", "type", "x", "-vvv"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_policy_is_required() {
        assert!(Cli::try_parse_from(["vinfo", "type", "x"]).is_err());
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["vinfo", "--policy", "p"]).is_err());
    }
}
