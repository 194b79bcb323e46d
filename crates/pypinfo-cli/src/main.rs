//! # pypinfo-cli
//!
//! Command-line access to the Python package index metadata interface.
//!
//! This is the entry point for the `pypinfo` tool. It parses arguments,
//! sets up logging and the panic hook, builds the index client and
//! dispatches to the command handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pypinfo_core::error::{PypiError, PypiResult};
use pypinfo_registry::DEFAULT_INDEX_URL;
use tracing::{error, info};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Query the Python package index metadata interface
#[derive(Parser)]
#[command(name = "pypinfo", version, about = "Query Python package index metadata")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// XML-RPC endpoint of the index
    #[arg(long, global = true, env = "PYPINFO_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
    pub index_url: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every registered package name
    Packages {
        /// Only print how many there are
        #[arg(long)]
        count: bool,
    },
    /// List the release versions of a package
    Releases {
        package: String,
        /// Include hidden releases
        #[arg(long)]
        hidden: bool,
    },
    /// List users holding a role on a package
    Roles { package: String },
    /// List packages a user holds a role on
    User { user: String },
    /// Show download counts per file of a release
    Downloads { package: String, version: String },
    /// Show the distributed files of a release
    Urls { package: String, version: String },
    /// Show the metadata of a release
    Data { package: String, version: String },
    /// Search releases by field, e.g. `name=requests summary=http`
    Search {
        /// FIELD=VALUE pairs; repeat a field to accept any of several values
        #[arg(value_name = "FIELD=VALUE", required = true)]
        terms: Vec<String>,
        /// Match any field instead of all of them
        #[arg(long)]
        or: bool,
    },
    /// List releases tagged with all of the given classifiers
    Browse {
        #[arg(value_name = "CLASSIFIER", required = true)]
        classifiers: Vec<String>,
    },
    /// Show changelog events since a UTC epoch timestamp
    Changelog {
        since: i64,
        /// Include event serial ids
        #[arg(long)]
        with_ids: bool,
    },
    /// Show the serial id of the latest changelog event
    LastSerial,
    /// Show changelog events after a serial id
    SinceSerial { serial: i64 },
    /// Walk through every query against one package
    Demo {
        #[arg(long, default_value = commands::demo::DEFAULT_PACKAGE)]
        package: String,
        /// Pause between calls, in milliseconds
        #[arg(long, default_value_t = 200)]
        delay_ms: u64,
    },
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting pypinfo v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Command failed: {}", err);
            eprintln!("{}", ErrorFormatter::new().format_error(&err));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> PypiResult<()> {
    // Each command awaits one call at a time; a current-thread runtime is enough
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| PypiError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new(&cli.index_url, cli.json)?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    // Logs go to stderr so --json output stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(format!("pypinfo={},pypinfo_registry={}", level, level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("pypinfo encountered an unexpected error: {}", panic_info);
        eprintln!("pypinfo crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/pypinfo/pypinfo/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
