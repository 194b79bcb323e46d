//! Release-level queries: `downloads`, `urls`, `data`.

use pypinfo_core::error::PypiResult;
use pypinfo_core::types::{FileDownloads, ReleaseData, ReleaseFile};

use super::CommandContext;

pub async fn downloads(package: &str, version: &str, ctx: &CommandContext) -> PypiResult<()> {
    let downloads = ctx.client.release_downloads(package, version).await?;
    show_downloads(package, version, &downloads, ctx)
}

pub fn show_downloads(
    package: &str,
    version: &str,
    downloads: &[FileDownloads],
    ctx: &CommandContext,
) -> PypiResult<()> {
    if ctx.output.is_json() {
        return ctx.output.json(downloads);
    }

    ctx.output.heading(&format!("Downloads of {} {}", package, version));
    for file in downloads {
        ctx.output.field(&file.filename, &file.downloads.to_string());
    }
    Ok(())
}

pub async fn urls(package: &str, version: &str, ctx: &CommandContext) -> PypiResult<()> {
    let files = ctx.client.release_urls(package, version).await?;
    show_urls(package, version, &files, ctx)
}

pub fn show_urls(
    package: &str,
    version: &str,
    files: &[ReleaseFile],
    ctx: &CommandContext,
) -> PypiResult<()> {
    if ctx.output.is_json() {
        return ctx.output.json(files);
    }

    ctx.output.heading(&format!("Files of {} {}", package, version));
    if files.is_empty() {
        ctx.output.warn("No files uploaded for this release");
    }
    for (index, file) in files.iter().enumerate() {
        if index > 0 {
            ctx.output.data("");
        }
        ctx.output.record(file.fields());
    }
    Ok(())
}

pub async fn data(package: &str, version: &str, ctx: &CommandContext) -> PypiResult<()> {
    let data = ctx.client.release_data(package, version).await?;
    show_data(package, version, &data, ctx)
}

pub fn show_data(
    package: &str,
    version: &str,
    data: &ReleaseData,
    ctx: &CommandContext,
) -> PypiResult<()> {
    if ctx.output.is_json() {
        return ctx.output.json(data);
    }

    ctx.output.heading(&format!("Metadata of {} {}", package, version));
    if data.is_empty() {
        ctx.output.warn("Release not found");
    }
    ctx.output.record(data.fields());
    Ok(())
}
