//! Upstream skill search: runs the configured command and captures stdout.

use tokio::process::Command;
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Run the search command with `query` appended and return its stdout.
///
/// A missing executable or a non-zero exit status is fatal for the run.
pub async fn run_search(config: &SearchConfig, query: &str) -> Result<String, SearchError> {
    debug!(command = %config.command, args = ?config.args, query, "running search command");

    let output = Command::new(&config.command)
        .args(&config.args)
        .arg(query)
        .env("NO_COLOR", "1")
        .env("FORCE_COLOR", "0")
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| SearchError::Spawn {
            command: config.command.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SearchError::Failed {
            command: config.command.clone(),
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> SearchConfig {
        SearchConfig {
            command: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    #[tokio::test]
    async fn captures_stdout_and_passes_query() {
        // With `sh -c`, the appended query becomes $0.
        let out = run_search(&sh("echo \"query=$0\""), "react").await.unwrap();
        assert_eq!(out.trim(), "query=react");
    }

    #[tokio::test]
    async fn non_zero_exit_is_failed() {
        let err = run_search(&sh("echo boom >&2; exit 3"), "x")
            .await
            .unwrap_err();
        match err {
            SearchError::Failed { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_command_is_spawn_error() {
        let config = SearchConfig {
            command: "enrich-find-no-such-binary".to_string(),
            args: vec![],
        };
        let err = run_search(&config, "x").await.unwrap_err();
        assert!(matches!(err, SearchError::Spawn { .. }));
    }
}
