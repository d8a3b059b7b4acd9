//! End-to-end showcase runs: `.env` loading, the Anthropic client and the
//! runner together, against a wiremock Messages API.

use clap::Parser;
use serial_test::serial;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prompt_showcase::providers::anthropic::API_KEY_ENV;
use prompt_showcase::{Args, Console, Exit, run_showcase};

fn clear_key() {
    // Safety: Tests run serially via #[serial], no concurrent env access.
    unsafe {
        std::env::remove_var(API_KEY_ENV);
    }
}

fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "msg_showcase",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "model": "claude-3-5-sonnet-20241022",
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 12, "output_tokens": 6}
    }))
}

fn args_for(server: &MockServer, env_file: &std::path::Path) -> Args {
    let uri = server.uri();
    Args::try_parse_from([
        "prompt-showcase",
        "--suite",
        "simple",
        "--env-file",
        env_file.to_str().unwrap(),
        "--base-url",
        uri.as_str(),
        "--model",
        "claude-3-5-sonnet-20241022",
    ])
    .unwrap()
}

#[tokio::test]
#[serial]
async fn test_simple_suite_against_mock_api() {
    clear_key();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("Review this Python code"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "type": "error",
            "error": {"type": "api_error", "message": "Internal server error"}
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(reply("Hello from the mock."))
        .expect(3)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join(".env");
    std::fs::write(&env_file, format!("{API_KEY_ENV}=sk-test\n")).unwrap();

    let args = args_for(&server, &env_file);
    let (console, captured) = Console::capture();
    let exit = run_showcase(&args, &console, &CancellationToken::new())
        .await
        .unwrap();

    let Exit::Completed(report) = &exit else {
        panic!("expected a completed run, got {exit:?}");
    };
    assert_eq!(report.succeeded(), 3);
    assert_eq!(report.total(), 4);
    assert_eq!(exit.code(false), 0);
    assert_eq!(exit.code(true), 1);

    let lines = captured.lines();
    assert_eq!(lines[0], "Simple Claude API Demo Starting...");
    assert_eq!(lines[1], "=".repeat(50));
    assert_eq!(lines[2], "✓ API key configured from .env file");
    assert_eq!(lines[3], "✓ Completion client ready");

    let out = captured.contents();
    assert!(out.contains("Claude: Hello from the mock.\n"));
    assert!(out.contains("❌ Error: InternalServerError: Internal server error (HTTP 500)"));
    assert!(!out.contains("Claude CLI"));
    assert!(out.ends_with("Completed 3/4 demos successfully.\n"));
    clear_key();
}

#[tokio::test]
#[serial]
async fn test_missing_key_runs_nothing() {
    clear_key();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join("missing.env");

    let args = args_for(&server, &env_file);
    let (console, captured) = Console::capture();
    let exit = run_showcase(&args, &console, &CancellationToken::new())
        .await
        .unwrap();

    assert!(matches!(exit, Exit::MissingCredentials));
    assert_eq!(exit.code(false), 1);

    let out = captured.contents();
    assert!(out.contains("❌ No API key found in .env file\n"));
    assert!(!out.contains("=== Demo"));
}

#[tokio::test]
#[serial]
async fn test_cancelled_before_start_reports_interrupt() {
    clear_key();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join(".env");
    std::fs::write(&env_file, format!("{API_KEY_ENV}=sk-test\n")).unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();

    let args = args_for(&server, &env_file);
    let (console, captured) = Console::capture();
    let exit = run_showcase(&args, &console, &cancel).await.unwrap();

    assert!(matches!(exit, Exit::Interrupted));
    assert_eq!(exit.code(false), 130);
    assert!(captured.contents().ends_with("\n\nDemo interrupted by user\n"));
    clear_key();
}
