//! Command implementations and dispatch logic.
//!
//! Each subcommand issues its remote call through the shared client and
//! hands the result to a `show_*` printer. The demo walk-through reuses the
//! same printers.

use pypinfo_core::error::PypiResult;
use pypinfo_registry::{ClientConfig, PypiClient};
use tracing::info;

pub mod changelog;
pub mod demo;
pub mod packages;
pub mod release;
pub mod search;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub client: PypiClient,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a context talking to `index_url`
    pub fn new(index_url: &str, json: bool) -> PypiResult<Self> {
        let config = ClientConfig::default().with_index_url(index_url)?;
        let client = PypiClient::with_config(&config)?;

        Ok(Self {
            client,
            output: OutputHandler::new(json),
        })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> PypiResult<()> {
    match command {
        Commands::Packages { count } => {
            info!("Listing packages (count only: {})", count);
            packages::list(count, ctx).await
        },
        Commands::Releases { package, hidden } => {
            info!("Listing releases of {} (hidden: {})", package, hidden);
            packages::releases(&package, hidden, ctx).await
        },
        Commands::Roles { package } => {
            info!("Listing roles on {}", package);
            packages::roles(&package, ctx).await
        },
        Commands::User { user } => {
            info!("Listing packages of user {}", user);
            packages::user(&user, ctx).await
        },
        Commands::Downloads { package, version } => {
            info!("Showing downloads of {} {}", package, version);
            release::downloads(&package, &version, ctx).await
        },
        Commands::Urls { package, version } => {
            info!("Showing files of {} {}", package, version);
            release::urls(&package, &version, ctx).await
        },
        Commands::Data { package, version } => {
            info!("Showing metadata of {} {}", package, version);
            release::data(&package, &version, ctx).await
        },
        Commands::Search { terms, or } => {
            info!("Searching with {:?} (or: {})", terms, or);
            search::search(&terms, or, ctx).await
        },
        Commands::Browse { classifiers } => {
            info!("Browsing {:?}", classifiers);
            search::browse(&classifiers, ctx).await
        },
        Commands::Changelog { since, with_ids } => {
            info!("Showing changelog since {} (with ids: {})", since, with_ids);
            changelog::since_timestamp(since, with_ids, ctx).await
        },
        Commands::LastSerial => {
            info!("Showing last changelog serial");
            changelog::last_serial(ctx).await
        },
        Commands::SinceSerial { serial } => {
            info!("Showing changelog since serial {}", serial);
            changelog::since_serial(serial, ctx).await
        },
        Commands::Demo { package, delay_ms } => {
            info!("Running demo against {} ({} ms between calls)", package, delay_ms);
            demo::execute(&package, std::time::Duration::from_millis(delay_ms), ctx).await
        },
        Commands::Version => {
            info!("Showing version information");
            show_version(ctx)
        },
    }
}

fn show_version(ctx: &CommandContext) -> PypiResult<()> {
    let version = env!("CARGO_PKG_VERSION");
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    if ctx.output.is_json() {
        return ctx.output.json(&serde_json::json!({
            "version": version,
            "built": env!("BUILD_DATE"),
            "target": target,
            "rustc": env!("RUSTC_VERSION"),
        }));
    }

    ctx.output.data(&format!("pypinfo v{}", version));
    ctx.output.field("Built", env!("BUILD_DATE"));
    ctx.output.field("Target", &target);
    ctx.output.field("Rust", env!("RUSTC_VERSION"));
    Ok(())
}
