//! Redirect-following HTTP fetcher.
//!
//! Defines the [`Fetcher`] trait the resolver depends on and the production
//! [`HttpFetcher`] behind it.
//!
//! # Outcome mapping
//!
//! | Condition | [`FetchStatus`] |
//! |-----------|-----------------|
//! | 2xx after at most `max_redirects` hops | `Ok` |
//! | 4xx / 5xx, 3xx without `Location`, one redirect too many | `HttpError` |
//! | whole call (all hops + body) exceeds the timeout | `Timeout` |
//! | DNS, connect, reset, unreadable body | `NetworkError` |
//!
//! Only an unusable input URL is reported as an `Err`. Bodies are cut off
//! after `max_body_bytes` and decoded as lossy UTF-8.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::HttpConfig;
use crate::error::FetchError;
use crate::models::FetchOutcome;

/// Redirect hops followed before the next redirect is treated as an error.
pub const DEFAULT_MAX_REDIRECTS: usize = 3;

/// Bytes of body kept per page; the description sits near the top.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// A single GET with bounded redirects and a hard timeout.
///
/// Implementations must encode ordinary network failures in the returned
/// [`FetchOutcome`] and never panic for them.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchOutcome, FetchError>;
}

/// [`Fetcher`] backed by `reqwest`, following redirects manually so the
/// hop count and the overall deadline stay under our control.
pub struct HttpFetcher {
    client: Client,
    max_redirects: usize,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            max_redirects: config.max_redirects,
            max_body_bytes: config.max_body_bytes,
        })
    }

    async fn follow(&self, start: Url) -> FetchOutcome {
        let mut current = start;
        let mut hops = 0usize;

        loop {
            debug!(url = %current, hop = hops, "GET");

            let mut response = match self
                .client
                .get(current.clone())
                .header("Accept", "text/html")
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) if e.is_timeout() => return FetchOutcome::timeout(current.as_str()),
                Err(e) => {
                    debug!(url = %current, error = %e, "request failed");
                    return FetchOutcome::network_error(current.as_str());
                }
            };

            let status = response.status();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let Some(location) = location else {
                    return FetchOutcome::http_error(status.as_u16(), current.as_str());
                };
                if hops >= self.max_redirects {
                    warn!(url = %current, max = self.max_redirects, "too many redirects");
                    return FetchOutcome::http_error(status.as_u16(), current.as_str());
                }
                match current.join(&location) {
                    Ok(next) => {
                        hops += 1;
                        current = next;
                        continue;
                    }
                    Err(e) => {
                        debug!(
                            url = %current,
                            location = %location,
                            error = %e,
                            "bad redirect target"
                        );
                        return FetchOutcome::http_error(status.as_u16(), current.as_str());
                    }
                }
            }

            if !status.is_success() {
                debug!(url = %current, status = status.as_u16(), "HTTP error");
                return FetchOutcome::http_error(status.as_u16(), current.as_str());
            }

            return match read_capped(&mut response, self.max_body_bytes).await {
                Ok(body) => FetchOutcome::ok(
                    status.as_u16(),
                    String::from_utf8_lossy(&body).into_owned(),
                    current.as_str(),
                ),
                Err(e) if e.is_timeout() => FetchOutcome::timeout(current.as_str()),
                Err(e) => {
                    debug!(url = %current, error = %e, "failed to read body");
                    FetchOutcome::network_error(current.as_str())
                }
            };
        }
    }
}

/// Read the body chunk by chunk, stopping once `limit` bytes are buffered.
async fn read_capped(response: &mut Response, limit: usize) -> reqwest::Result<Vec<u8>> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            debug!(limit, "body truncated");
            break;
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchOutcome, FetchError> {
        let start = parse_http_url(url)?;
        match tokio::time::timeout(timeout, self.follow(start.clone())).await {
            Ok(outcome) => Ok(outcome),
            Err(_) => {
                debug!(url, ?timeout, "fetch timed out");
                Ok(FetchOutcome::timeout(start.as_str()))
            }
        }
    }
}

/// Parse `url`, accepting only `http` and `https`.
pub fn parse_http_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::UnsupportedScheme {
            url: url.to_string(),
            scheme: parsed.scheme().to_string(),
        });
    }
    Ok(parsed)
}
