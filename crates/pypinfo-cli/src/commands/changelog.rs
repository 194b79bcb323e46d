//! Changelog queries: `changelog`, `last-serial`, `since-serial`.

use chrono::DateTime;
use pypinfo_core::error::PypiResult;
use pypinfo_core::types::ChangelogEntry;

use super::CommandContext;

pub async fn since_timestamp(since: i64, with_ids: bool, ctx: &CommandContext) -> PypiResult<()> {
    let entries = ctx.client.changelog(since, with_ids).await?;
    show_entries(&format!("Changes since {}", format_timestamp(since)), &entries, ctx)
}

pub async fn last_serial(ctx: &CommandContext) -> PypiResult<()> {
    let serial = ctx.client.changelog_last_serial().await?;
    show_serial(serial, ctx)
}

pub fn show_serial(serial: i64, ctx: &CommandContext) -> PypiResult<()> {
    if ctx.output.is_json() {
        return ctx.output.json(&serial);
    }
    ctx.output.field("Last serial", &serial.to_string());
    Ok(())
}

pub async fn since_serial(serial: i64, ctx: &CommandContext) -> PypiResult<()> {
    let entries = ctx.client.changelog_since_serial(serial).await?;
    show_entries(&format!("Changes since serial {}", serial), &entries, ctx)
}

pub fn show_entries(title: &str, entries: &[ChangelogEntry], ctx: &CommandContext) -> PypiResult<()> {
    if ctx.output.is_json() {
        return ctx.output.json(entries);
    }

    ctx.output.heading(title);
    for entry in entries {
        ctx.output.data(&format_entry(entry));
    }
    Ok(())
}

/// One line per event: time, serial if known, package, version, action
pub fn format_entry(entry: &ChangelogEntry) -> String {
    let serial = entry
        .serial
        .map(|serial| format!(" #{}", serial))
        .unwrap_or_default();
    format!(
        "{}{}  {} {}  {}",
        format_timestamp(entry.timestamp),
        serial,
        entry.name,
        entry.version.as_deref().unwrap_or("-"),
        entry.action
    )
}

/// Render UTC epoch seconds; out-of-range values are printed raw
pub fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
