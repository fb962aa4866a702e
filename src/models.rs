//! Core data models used throughout the enrichment pipeline.
//!
//! Hits flow from the parser into the scheduler, fetch outcomes are consumed
//! by the resolver, and description results flow into the renderer.

use serde::Serialize;

/// One parsed result from the upstream search command.
///
/// Immutable once created. The position of a hit in its list is the
/// upstream relevance rank and is preserved end-to-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub owner: String,
    pub repo_name: String,
    pub skill_name: String,
    pub canonical_url: String,
}

impl SearchHit {
    /// The `owner/repo@skill` identifier as printed by the search tool.
    pub fn id(&self) -> String {
        format!("{}/{}@{}", self.owner, self.repo_name, self.skill_name)
    }
}

/// Classification of a single GET attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FetchStatus {
    Ok,
    HttpError,
    Timeout,
    NetworkError,
}

/// Result of one fetch, including every followed redirect hop.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub status: FetchStatus,
    pub status_code: Option<u16>,
    /// Present only when `status` is [`FetchStatus::Ok`].
    pub body: Option<String>,
    pub final_url: String,
}

impl FetchOutcome {
    pub fn ok(status_code: u16, body: String, final_url: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::Ok,
            status_code: Some(status_code),
            body: Some(body),
            final_url: final_url.into(),
        }
    }

    pub fn http_error(status_code: u16, final_url: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::HttpError,
            status_code: Some(status_code),
            body: None,
            final_url: final_url.into(),
        }
    }

    pub fn timeout(final_url: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::Timeout,
            status_code: None,
            body: None,
            final_url: final_url.into(),
        }
    }

    pub fn network_error(final_url: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::NetworkError,
            status_code: None,
            body: None,
            final_url: final_url.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == FetchStatus::Ok
    }
}

/// Which description source produced the text for a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceUsed {
    Primary,
    Fallback,
    None,
}

/// The enrichment result for exactly one [`SearchHit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionResult {
    pub hit: SearchHit,
    pub description: Option<String>,
    pub source_used: SourceUsed,
}

impl DescriptionResult {
    /// A result carrying no description, used for failures and no-fetch mode.
    pub fn unresolved(hit: SearchHit) -> Self {
        Self {
            hit,
            description: None,
            source_used: SourceUsed::None,
        }
    }

    pub fn resolved(hit: SearchHit, description: String, source_used: SourceUsed) -> Self {
        Self {
            hit,
            description: Some(description),
            source_used,
        }
    }
}
