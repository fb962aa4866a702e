//! Source resolution: primary page first, fallback page second.
//!
//! Every failure here is local to one hit. A fetch error, HTTP error,
//! timeout or empty extraction on the primary source moves on to the
//! fallback; failing both yields an unresolved result. Nothing is returned
//! as an error, so callers can treat every resolution as infallible.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::SourcesConfig;
use crate::extract::extract_description_truncated;
use crate::fetch::Fetcher;
use crate::models::{DescriptionResult, SearchHit, SourceUsed};

pub struct SourceResolver {
    fetcher: Arc<dyn Fetcher>,
    sources: SourcesConfig,
    max_description_chars: usize,
}

impl SourceResolver {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        sources: SourcesConfig,
        max_description_chars: usize,
    ) -> Self {
        Self {
            fetcher,
            sources,
            max_description_chars,
        }
    }

    /// Produce exactly one [`DescriptionResult`] for `hit`.
    pub async fn resolve(&self, hit: &SearchHit, timeout: Duration) -> DescriptionResult {
        if let Some(text) = self.describe_from(&hit.canonical_url, timeout).await {
            debug!(hit = %hit.id(), "described by primary source");
            return DescriptionResult::resolved(hit.clone(), text, SourceUsed::Primary);
        }

        let fallback_url = self.sources.fallback_url(hit);
        if let Some(text) = self.describe_from(&fallback_url, timeout).await {
            debug!(hit = %hit.id(), "described by fallback source");
            return DescriptionResult::resolved(hit.clone(), text, SourceUsed::Fallback);
        }

        debug!(hit = %hit.id(), "no description found");
        DescriptionResult::unresolved(hit.clone())
    }

    async fn describe_from(&self, url: &str, timeout: Duration) -> Option<String> {
        let outcome = match self.fetcher.fetch(url, timeout).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(url, error = %e, "skipping source");
                return None;
            }
        };

        if !outcome.is_ok() {
            debug!(url, status = ?outcome.status, code = ?outcome.status_code, "source unavailable");
            return None;
        }

        let body = outcome.body?;
        extract_description_truncated(&body, self.max_description_chars)
    }
}
