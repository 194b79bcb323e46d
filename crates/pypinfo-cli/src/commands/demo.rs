//! `pypinfo demo`: exercise every query against one package.
//!
//! Pauses between calls to go easy on the index. Steps that need a release
//! version are skipped when the package has none.

use std::time::Duration;

use pypinfo_core::error::PypiResult;
use pypinfo_core::types::{SearchField, SearchOperator, SearchSpec};
use tracing::debug;

use super::{changelog, packages, release, search, CommandContext};

/// Package the walk-through queries by default
pub const DEFAULT_PACKAGE: &str = "PyRedstone";

/// Classifier used for the browse step
pub const DEMO_CLASSIFIER: &str = "Topic :: Scientific/Engineering";

/// Timestamp used for the changelog step (2016-11-30 16:28:03 UTC)
pub const DEMO_SINCE: i64 = 1480523283;

/// How far back from the last serial the since-serial step starts
pub const SERIAL_WINDOW: i64 = 10;

pub async fn execute(package: &str, delay: Duration, ctx: &CommandContext) -> PypiResult<()> {
    // The full list is far too long to print; only its size is shown
    let all_packages = ctx.client.list_packages().await?;
    ctx.output
        .info(&format!("The index lists {} packages", all_packages.len()));
    pause(delay).await;

    let versions = ctx.client.package_releases(package, false).await?;
    packages::show_releases(package, &versions, ctx)?;
    pause(delay).await;

    let roles = ctx.client.package_roles(package).await?;
    packages::show_roles(package, &roles, ctx)?;
    pause(delay).await;

    match roles.first() {
        Some(first) => {
            let owned = ctx.client.user_packages(&first.user).await?;
            packages::show_user_packages(&first.user, &owned, ctx)?;
            pause(delay).await;
        },
        None => ctx.output.warn("No roles listed; skipping user packages"),
    }

    match versions.first() {
        Some(version) => release_steps(package, version, delay, ctx).await?,
        None => ctx.output.warn("No releases; skipping release queries"),
    }

    let classifiers = [DEMO_CLASSIFIER.to_string()];
    let entries = ctx.client.browse(&classifiers).await?;
    search::show_browse(&classifiers, &entries, ctx)?;
    pause(delay).await;

    let changes = ctx.client.changelog(DEMO_SINCE, true).await?;
    changelog::show_entries(
        &format!("Changes since {}", changelog::format_timestamp(DEMO_SINCE)),
        &changes,
        ctx,
    )?;
    pause(delay).await;

    let serial = ctx.client.changelog_last_serial().await?;
    changelog::show_serial(serial, ctx)?;
    pause(delay).await;

    let since = serial - SERIAL_WINDOW;
    let recent = ctx.client.changelog_since_serial(since).await?;
    changelog::show_entries(&format!("Changes since serial {}", since), &recent, ctx)
}

async fn release_steps(
    package: &str,
    version: &str,
    delay: Duration,
    ctx: &CommandContext,
) -> PypiResult<()> {
    let downloads = ctx.client.release_downloads(package, version).await?;
    release::show_downloads(package, version, &downloads, ctx)?;
    pause(delay).await;

    let files = ctx.client.release_urls(package, version).await?;
    release::show_urls(package, version, &files, ctx)?;
    pause(delay).await;

    let data = ctx.client.release_data(package, version).await?;
    release::show_data(package, version, &data, ctx)?;
    pause(delay).await;

    let spec = SearchSpec::new()
        .with(SearchField::Name, package)
        .with(SearchField::Version, version);
    let hits = ctx.client.search(&spec, SearchOperator::And).await?;
    search::show_hits(&hits, ctx)?;
    pause(delay).await;

    Ok(())
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        debug!("Pausing {:?} before the next call", delay);
        tokio::time::sleep(delay).await;
    }
}
