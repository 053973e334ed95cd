//! # sgm CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sgm_cli::docs::{run_docs, DocsArgs};
use sgm_cli::plans::{run_plans, PlansArgs};
use sgm_cli::sla::{run_sla, SlaArgs};
use sgm_cli::SgmConfig;

/// SGM governance tools
///
/// SLA tracking and assignment for governance cases, document version
/// diffs, and plan completion.
#[derive(Parser, Debug)]
#[command(name = "sgm", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Case SLA reports, assignee load, and assignment suggestions.
    Sla(SlaArgs),

    /// Document version history and diffs.
    Docs(DocsArgs),

    /// Plan completion.
    Plans(PlansArgs),
}

fn verbosity_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(verbosity_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "sgm starting");

    let result = SgmConfig::resolve(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Sla(args) => run_sla(args, &config),
        Commands::Docs(args) => run_docs(args, &config),
        Commands::Plans(args) => run_plans(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
