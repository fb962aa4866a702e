//! Parsing upstream search output into [`SearchHit`]s.
//!
//! The search tool prints one `owner/repo@skill` identifier per result,
//! usually followed by a `└ <url>` line and sometimes wrapped in colour
//! codes or list markers. Only the identifier matters; everything else is
//! skipped.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::config::SourcesConfig;
use crate::models::SearchHit;

fn ansi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("valid ANSI regex"))
}

fn hit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[\s(\[])([A-Za-z0-9][\w.-]*)/([\w.-]+)@([\w.:-]+)(?:[\s)\],;]|$)")
            .expect("valid hit regex")
    })
}

/// Remove terminal escape sequences.
pub fn strip_ansi(text: &str) -> String {
    ansi_re().replace_all(text, "").into_owned()
}

/// Parse raw search output into an ordered, deduplicated list of hits,
/// truncated at `max_results`.
///
/// An empty vector means "no skills found"; it is not an error.
pub fn parse_hits(raw: &str, max_results: usize, sources: &SourcesConfig) -> Vec<SearchHit> {
    let clean = strip_ansi(raw);
    let mut seen = HashSet::new();
    let mut hits = Vec::new();

    for line in clean.lines() {
        if hits.len() >= max_results {
            break;
        }
        let Some(caps) = hit_re().captures(line) else {
            continue;
        };
        let owner = &caps[1];
        let repo = &caps[2];
        let skill = caps[3].trim_end_matches(['.', ':']);
        if skill.is_empty() {
            continue;
        }
        if !seen.insert((owner.to_string(), repo.to_string(), skill.to_string())) {
            continue;
        }
        hits.push(SearchHit {
            owner: owner.to_string(),
            repo_name: repo.to_string(),
            skill_name: skill.to_string(),
            canonical_url: sources.primary_url(owner, repo, skill),
        });
    }

    hits
}
