//! End-to-end tests driving the `enrich-find` binary.
//!
//! The upstream search command is replaced by `sh -c 'cat <fixture>'` via a
//! config file, and description sources point at a local mock server.
#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_OUTPUT: &str = "\
vercel-labs/agent-skills@react-best-practices
└ https://skills.sh/vercel-labs/agent-skills/react-best-practices

anthropics/skills@frontend-design
└ https://skills.sh/anthropics/skills/frontend-design

acme/ui@react-testing
└ https://skills.sh/acme/ui/react-testing
";

fn setup_test_env(search_output: &str, sources: Option<(&str, &str)>) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    let fixture = root.join("search.txt");
    fs::write(&fixture, search_output).unwrap();

    let mut config_content = format!(
        r#"[search]
command = "sh"
args = ["-c", "cat '{}'"]
"#,
        fixture.display()
    );
    if let Some((primary, fallback)) = sources {
        config_content.push_str(&format!(
            "\n[sources]\nprimary = \"{}\"\nfallback = \"{}\"\n",
            primary, fallback
        ));
    }

    let config_path = root.join("enrich.toml");
    fs::write(&config_path, config_content).unwrap();
    (tmp, config_path)
}

async fn run_enrich_find(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_enrich-find"))
        .arg("--config")
        .arg(config_path)
        .args(args)
        .output()
        .await
        .expect("failed to run enrich-find binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[tokio::test]
async fn no_fetch_prints_raw_matches() {
    let (_tmp, config_path) = setup_test_env(SEARCH_OUTPUT, None);

    let (stdout, stderr, success) = run_enrich_find(&config_path, &["react", "--no-fetch"]).await;
    assert!(success, "run failed: stdout={}, stderr={}", stdout, stderr);
    assert_eq!(
        stdout,
        "vercel-labs/agent-skills@react-best-practices\n\
         └ https://skills.sh/vercel-labs/agent-skills/react-best-practices\n\
         \n\
         anthropics/skills@frontend-design\n\
         └ https://skills.sh/anthropics/skills/frontend-design\n\
         \n\
         acme/ui@react-testing\n\
         └ https://skills.sh/acme/ui/react-testing\n"
    );
}

#[tokio::test]
async fn empty_search_prints_no_skills_found() {
    let (_tmp, config_path) = setup_test_env("No matching skills.\n", None);

    let (stdout, _, success) = run_enrich_find(&config_path, &["zzz"]).await;
    assert!(success);
    assert_eq!(stdout, "No skills found.\n");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn enriches_in_order_with_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/p/vercel-labs/agent-skills/react-best-practices"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<main><div class=\"prose\"><p>React performance guide.</p></div></main>"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/f/anthropics/skills/frontend-design"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<head><meta name=\"description\" content=\"Design UIs.\"></head>"),
        )
        .mount(&server)
        .await;

    let primary = format!("{}/p/{{owner}}/{{repo}}/{{skill}}", server.uri());
    let fallback = format!("{}/f/{{owner}}/{{repo}}/{{skill}}", server.uri());
    let (_tmp, config_path) = setup_test_env(SEARCH_OUTPUT, Some((&primary, &fallback)));

    let (stdout, stderr, success) = run_enrich_find(
        &config_path,
        &["react", "--concurrency", "2", "--timeout", "5"],
    )
    .await;
    assert!(success, "run failed: stdout={}, stderr={}", stdout, stderr);

    let blocks: Vec<&str> = stdout.trim_end().split("\n\n").collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].starts_with("vercel-labs/agent-skills@react-best-practices\n"));
    assert!(blocks[0].ends_with("\nReact performance guide."));
    assert!(blocks[1].starts_with("anthropics/skills@frontend-design\n"));
    assert!(blocks[1].ends_with("\nDesign UIs."));
    assert!(blocks[2].starts_with("acme/ui@react-testing\n"));
    assert!(blocks[2].ends_with("\n[no description found]"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn huge_concurrency_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<article><p>Described.</p></article>"))
        .mount(&server)
        .await;

    let primary = format!("{}/p/{{owner}}/{{repo}}/{{skill}}", server.uri());
    let fallback = format!("{}/f/{{owner}}/{{repo}}/{{skill}}", server.uri());
    let (_tmp, config_path) = setup_test_env(SEARCH_OUTPUT, Some((&primary, &fallback)));

    let max = usize::MAX.to_string();
    let (stdout, stderr, success) =
        run_enrich_find(&config_path, &["react", "--concurrency", &max]).await;
    assert!(success, "run failed: stdout={}, stderr={}", stdout, stderr);
    assert_eq!(stdout.matches("Described.").count(), 3);
}

#[tokio::test]
async fn max_limits_results() {
    let (_tmp, config_path) = setup_test_env(SEARCH_OUTPUT, None);

    let (stdout, _, success) =
        run_enrich_find(&config_path, &["react", "--no-fetch", "--max", "2"]).await;
    assert!(success);
    assert!(stdout.contains("frontend-design"));
    assert!(!stdout.contains("react-testing"));
}

#[tokio::test]
async fn json_output_is_an_array() {
    let (_tmp, config_path) = setup_test_env(SEARCH_OUTPUT, None);

    let (stdout, _, success) =
        run_enrich_find(&config_path, &["react", "--no-fetch", "--json"]).await;
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["source_used"], "none");
    assert!(items[0]["description"].is_null());
}

#[tokio::test]
async fn missing_search_command_fails_without_output() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("enrich.toml");
    fs::write(
        &config_path,
        "[search]\ncommand = \"enrich-find-missing-search-tool\"\nargs = []\n",
    )
    .unwrap();

    let (stdout, stderr, success) = run_enrich_find(&config_path, &["react"]).await;
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("enrich-find-missing-search-tool"));
}

#[tokio::test]
async fn failing_search_command_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("enrich.toml");
    fs::write(
        &config_path,
        "[search]\ncommand = \"sh\"\nargs = [\"-c\", \"echo partial; exit 1\"]\n",
    )
    .unwrap();

    let (stdout, _, success) = run_enrich_find(&config_path, &["react"]).await;
    assert!(!success);
    assert!(stdout.is_empty());
}

#[tokio::test]
async fn invalid_options_are_usage_errors() {
    let (_tmp, config_path) = setup_test_env(SEARCH_OUTPUT, None);

    for args in [
        &["react", "--concurrency", "0"][..],
        &["react", "--max", "many"][..],
        &["react", "--bogus"][..],
    ] {
        let (stdout, stderr, success) = run_enrich_find(&config_path, args).await;
        assert!(!success, "expected failure for {:?}", args);
        assert!(stdout.is_empty());
        assert!(!stderr.is_empty());
    }
}
