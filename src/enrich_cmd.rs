//! The `enrich-find` pipeline: search, parse, enrich, render.
//!
//! The run moves through `parsing → (enriching | skipped) → rendering`.
//! Only the search step can fail the run; everything after it degrades
//! per item.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, EnrichmentConfig};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::parse::parse_hits;
use crate::render::{render_json, render_text, RenderOptions};
use crate::resolve::SourceResolver;
use crate::scheduler::enrich;
use crate::search::run_search;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Run the upstream search for `query` and return the finished report.
///
/// Nothing is printed here, so a fatal error leaves stdout untouched.
pub async fn run_enrich(
    config: &Config,
    query: &str,
    enrichment: &EnrichmentConfig,
    format: OutputFormat,
    bold: bool,
) -> Result<String> {
    let raw = run_search(&config.search, query).await?;
    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.http)?);
    build_report(&raw, config, enrichment, fetcher, format, bold).await
}

/// Everything after the search step, for already-captured search output.
pub async fn build_report(
    raw: &str,
    config: &Config,
    enrichment: &EnrichmentConfig,
    fetcher: Arc<dyn Fetcher>,
    format: OutputFormat,
    bold: bool,
) -> Result<String> {
    let hits = parse_hits(raw, enrichment.max_results, &config.sources);
    info!(hits = hits.len(), "parsed search output");

    let resolver = Arc::new(SourceResolver::new(
        fetcher,
        config.sources.clone(),
        config.http.max_description_chars,
    ));
    let results = enrich(hits, enrichment, resolver).await;

    match format {
        OutputFormat::Json => render_json(&results),
        OutputFormat::Text => Ok(render_text(
            &results,
            RenderOptions {
                bold,
                show_descriptions: enrichment.fetch_descriptions,
            },
        )),
    }
}
