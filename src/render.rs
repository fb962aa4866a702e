//! Formatting enriched results into the final report.
//!
//! Pure functions of their input: no I/O and no error states. The caller
//! prints the returned string in one write.

use anyhow::Result;

use crate::models::DescriptionResult;

pub const NO_SKILLS_FOUND: &str = "No skills found.";
pub const NO_DESCRIPTION: &str = "[no description found]";

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap the `owner/repo@skill` line in ANSI bold.
    pub bold: bool,
    /// Print the description line. Off in no-fetch mode.
    pub show_descriptions: bool,
}

/// Render the plain-text report: one block per result, blank line between
/// blocks.
pub fn render_text(results: &[DescriptionResult], options: RenderOptions) -> String {
    if results.is_empty() {
        return format!("{}\n", NO_SKILLS_FOUND);
    }

    let blocks: Vec<String> = results
        .iter()
        .map(|result| render_block(result, options))
        .collect();
    format!("{}\n", blocks.join("\n\n"))
}

fn render_block(result: &DescriptionResult, options: RenderOptions) -> String {
    let id = result.hit.id();
    let mut block = if options.bold {
        format!("{}{}{}", BOLD, id, RESET)
    } else {
        id
    };
    block.push_str("\n└ ");
    block.push_str(&result.hit.canonical_url);

    if options.show_descriptions {
        block.push('\n');
        block.push_str(result.description.as_deref().unwrap_or(NO_DESCRIPTION));
    }
    block
}

/// Render the results as a pretty-printed JSON array.
pub fn render_json(results: &[DescriptionResult]) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(results)?))
}
