//! # enrich-find
//!
//! Skill search with descriptions. Runs an external skill-search command,
//! then fetches a human-readable description for every hit, concurrently,
//! from a primary catalog page with a fallback documentation page.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────┐   ┌───────────┐   ┌──────────┐   ┌──────────┐
//! │  search  │──▶│ parse  │──▶│ scheduler │──▶│ resolve  │──▶│  render  │
//! │ (child)  │   │  hits  │   │ N at once │   │ 1° → 2°  │   │ in order │
//! └──────────┘   └────────┘   └───────────┘   └────┬─────┘   └──────────┘
//!                                                  ▼
//!                                          fetch + extract
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! enrich-find "react"                              # search and describe
//! enrich-find "react" --max 2 --concurrency 1      # two hits, one at a time
//! enrich-find "react" --no-fetch                   # raw matches only
//! enrich-find "react" --json --config ./enrich.toml
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and per-run options |
//! | [`models`] | Core data types |
//! | [`search`] | Upstream search subprocess |
//! | [`parse`] | Search output parsing |
//! | [`fetch`] | Redirect-following HTTP fetcher |
//! | [`extract`] | HTML description extraction |
//! | [`resolve`] | Primary/fallback source resolution |
//! | [`scheduler`] | Bounded-concurrency enrichment |
//! | [`render`] | Text and JSON output |
//! | [`enrich_cmd`] | The end-to-end pipeline |

pub mod config;
pub mod enrich_cmd;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod parse;
pub mod render;
pub mod resolve;
pub mod scheduler;
pub mod search;
