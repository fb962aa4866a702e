//! Typed errors for the fatal paths of a run.
//!
//! Per-item network failures are not errors: they are recorded in
//! [`FetchOutcome`](crate::models::FetchOutcome) and degrade to an
//! unresolved result. Only the conditions below abort a run.

use thiserror::Error;

/// Failure to obtain output from the upstream search command.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to run search command '{command}'. Is it installed and on PATH? ({source})")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("search command '{command}' exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Caller errors for a fetch: the URL itself is unusable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },
}
