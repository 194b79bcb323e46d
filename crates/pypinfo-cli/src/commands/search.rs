//! `search` and `browse`.

use pypinfo_core::error::{PypiError, PypiResult};
use pypinfo_core::types::{BrowseEntry, SearchField, SearchHit, SearchOperator, SearchSpec};

use super::CommandContext;

pub async fn search(terms: &[String], or: bool, ctx: &CommandContext) -> PypiResult<()> {
    let spec = parse_search_terms(terms)?;
    let operator = if or { SearchOperator::Or } else { SearchOperator::And };

    let hits = ctx.client.search(&spec, operator).await?;
    show_hits(&hits, ctx)
}

/// Turn `field=value` arguments into a search spec.
///
/// A field given more than once matches any of its values.
pub fn parse_search_terms(terms: &[String]) -> PypiResult<SearchSpec> {
    let mut spec = SearchSpec::new();
    for term in terms {
        let (field, value) = term
            .split_once('=')
            .ok_or_else(|| PypiError::InvalidArgument {
                argument: term.clone(),
                reason: "expected FIELD=VALUE".to_string(),
            })?;
        spec.push(field.trim().parse::<SearchField>()?, value);
    }
    Ok(spec)
}

pub fn show_hits(hits: &[SearchHit], ctx: &CommandContext) -> PypiResult<()> {
    if ctx.output.is_json() {
        return ctx.output.json(hits);
    }

    ctx.output.heading(&format!("{} matches", hits.len()));
    for hit in hits {
        ctx.output.data(&format!(
            "{} {}  {}",
            hit.name().unwrap_or("?"),
            hit.version().unwrap_or("?"),
            hit.summary().unwrap_or("")
        ));
    }
    Ok(())
}

pub async fn browse(classifiers: &[String], ctx: &CommandContext) -> PypiResult<()> {
    let entries = ctx.client.browse(classifiers).await?;
    show_browse(classifiers, &entries, ctx)
}

pub fn show_browse(
    classifiers: &[String],
    entries: &[BrowseEntry],
    ctx: &CommandContext,
) -> PypiResult<()> {
    if ctx.output.is_json() {
        return ctx.output.json(entries);
    }

    ctx.output.heading(&format!("Releases classified {}", classifiers.join(" + ")));
    for entry in entries {
        ctx.output.data(&format!("{} {}", entry.name, entry.version));
    }
    Ok(())
}
