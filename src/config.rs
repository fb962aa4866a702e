//! Configuration: the optional TOML file and the per-run [`EnrichmentConfig`].
//!
//! Every field has a built-in default, so running without `--config` is the
//! same as loading an empty file. Command-line flags take precedence over
//! the `[enrich]` section.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::models::SearchHit;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub enrich: EnrichDefaults,
}

/// How to invoke the upstream search command. The query is appended as the
/// final argument.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_search_command")]
    pub command: String,
    #[serde(default = "default_search_args")]
    pub args: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            command: default_search_command(),
            args: default_search_args(),
        }
    }
}

fn default_search_command() -> String {
    "npx".to_string()
}
fn default_search_args() -> Vec<String> {
    vec!["skills".to_string(), "find".to_string()]
}

/// URL templates for the two description sources. `{owner}`, `{repo}` and
/// `{skill}` are substituted per hit.
#[derive(Debug, Deserialize, Clone)]
pub struct SourcesConfig {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            fallback: default_fallback(),
        }
    }
}

fn default_primary() -> String {
    "https://skills.sh/{owner}/{repo}/{skill}".to_string()
}
fn default_fallback() -> String {
    "https://github.com/{owner}/{repo}/tree/main/skills/{skill}".to_string()
}

impl SourcesConfig {
    pub fn primary_url(&self, owner: &str, repo: &str, skill: &str) -> String {
        render_template(&self.primary, owner, repo, skill)
    }

    pub fn fallback_url(&self, hit: &SearchHit) -> String {
        render_template(&self.fallback, &hit.owner, &hit.repo_name, &hit.skill_name)
    }
}

fn render_template(template: &str, owner: &str, repo: &str, skill: &str) -> String {
    template
        .replace("{owner}", owner)
        .replace("{repo}", repo)
        .replace("{skill}", skill)
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_max_description_chars")]
    pub max_description_chars: usize,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
            max_description_chars: default_max_description_chars(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_user_agent() -> String {
    concat!("enrich-find/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_max_redirects() -> usize {
    crate::fetch::DEFAULT_MAX_REDIRECTS
}
fn default_max_description_chars() -> usize {
    300
}
fn default_max_body_bytes() -> usize {
    crate::fetch::DEFAULT_MAX_BODY_BYTES
}

/// Defaults for the per-run flags, overridable on the command line.
#[derive(Debug, Deserialize, Clone)]
pub struct EnrichDefaults {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for EnrichDefaults {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_max_results() -> usize {
    10
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_concurrency() -> usize {
    5
}

/// Options for a single invocation. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentConfig {
    pub max_results: usize,
    pub timeout_secs: u64,
    pub concurrency: usize,
    pub fetch_descriptions: bool,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
            fetch_descriptions: true,
        }
    }
}

impl EnrichmentConfig {
    /// Merge command-line overrides onto the config file defaults.
    pub fn from_overrides(
        defaults: &EnrichDefaults,
        max_results: Option<usize>,
        timeout_secs: Option<u64>,
        concurrency: Option<usize>,
        no_fetch: bool,
    ) -> Self {
        Self {
            max_results: max_results.unwrap_or(defaults.max_results),
            timeout_secs: timeout_secs.unwrap_or(defaults.timeout_secs),
            concurrency: concurrency.unwrap_or(defaults.concurrency),
            fetch_descriptions: !no_fetch,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    if config.search.command.trim().is_empty() {
        bail!("search.command must not be empty");
    }

    for (name, template) in [
        ("sources.primary", &config.sources.primary),
        ("sources.fallback", &config.sources.fallback),
    ] {
        let sample = render_template(template, "owner", "repo", "skill");
        let url = url::Url::parse(&sample)
            .with_context(|| format!("{} is not a valid URL template: '{}'", name, template))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("{} must be an http(s) URL, got '{}'", name, template);
        }
    }

    if config.http.max_description_chars == 0 {
        bail!("http.max_description_chars must be > 0");
    }
    if config.http.max_body_bytes == 0 {
        bail!("http.max_body_bytes must be > 0");
    }
    if config.enrich.max_results == 0 {
        bail!("enrich.max_results must be > 0");
    }
    if config.enrich.timeout_secs == 0 {
        bail!("enrich.timeout_secs must be > 0");
    }
    if config.enrich.concurrency == 0 {
        bail!("enrich.concurrency must be > 0");
    }

    Ok(())
}
