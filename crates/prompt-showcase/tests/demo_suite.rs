//! Demo suites driven end to end through the runner with a scripted service.

use std::sync::Arc;

use prompt_showcase::testing::MockService;
use prompt_showcase::{CompletionService, Console, Error, Runner, Suite, suite_units};

fn runner(console: Console) -> Runner {
    Runner::new(console).noun("demos")
}

#[tokio::test]
async fn test_full_suite_all_succeed() {
    let mock = Arc::new(
        MockService::new("mock")
            .with_text("Hello! I'm Claude.")
            .with_text("def reverse(s): return s[::-1]")
            .with_text("Iterate directly over the list.")
            .with_text("Division by zero; check b first.")
            .with_text("class Calculator: ...")
            .with_text("def add(self, a, b): return a + b")
            .with_text("Use try/except blocks."),
    );
    let service: Arc<dyn CompletionService> = mock.clone();
    let (console, captured) = Console::capture();

    let report = runner(console.clone())
        .run(suite_units(Suite::Full, service, console))
        .await;

    assert_eq!(report.total(), 6);
    assert!(report.all_succeeded());
    assert_eq!(mock.call_count(), 7);
    assert_eq!(
        report.labels(),
        vec![
            "Hello World",
            "Code Generation",
            "Code Review",
            "Debugging Help",
            "Multi-turn",
            "Error Handling"
        ]
    );

    let out = captured.contents();
    let headings: Vec<_> = out.lines().filter(|l| l.starts_with("=== Demo")).collect();
    assert_eq!(
        headings,
        vec![
            "=== Demo 1: Hello World ===",
            "=== Demo 2: Code Generation ===",
            "=== Demo 3: Code Review ===",
            "=== Demo 4: Debugging Help ===",
            "=== Demo 5: Multi-turn Conversation ===",
            "=== Demo 6: Error Handling ===",
        ]
    );
    assert!(out.contains("Claude: Hello! I'm Claude.\n"));
    assert!(out.contains("Success!\nUse try/except blocks....\n"));
    assert!(out.ends_with("Completed 6/6 demos successfully.\n"));
}

#[tokio::test]
async fn test_failures_stay_inside_their_demo() {
    let mock = Arc::new(
        MockService::new("mock")
            .with_text("Hello!")
            .with_error(Error::from_http_status(
                429,
                "rate limited".into(),
                None,
                None,
            ))
            .with_text("Looks fine.")
            .with_error(Error::from_http_status(500, "upstream".into(), None, None)),
    );
    let service: Arc<dyn CompletionService> = mock.clone();
    let (console, captured) = Console::capture();

    let report = runner(console.clone())
        .run(suite_units(Suite::Simple, service, console))
        .await;

    assert_eq!(mock.call_count(), 4);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.total(), 4);

    let out = captured.contents();
    assert!(out.contains("❌ Error: RateLimitError: rate limited (HTTP 429)"));
    assert!(out.contains("❌ Error: InternalServerError: upstream (HTTP 500)"));
    assert!(out.contains("Code Review:\nLooks fine.\n"));
    assert!(out.ends_with("Completed 2/4 demos successfully.\n"));
}

#[tokio::test]
async fn test_error_handling_demo_counts_handled_error_as_failure() {
    let mut mock = MockService::new("mock");
    for _ in 0..6 {
        mock = mock.with_text("ok");
    }
    let mock = Arc::new(mock.with_error(Error::from_http_status(
        401,
        "invalid x-api-key".into(),
        None,
        None,
    )));
    let service: Arc<dyn CompletionService> = mock.clone();
    let (console, captured) = Console::capture();

    let report = runner(console.clone())
        .run(suite_units(Suite::Full, service, console))
        .await;

    assert_eq!(report.succeeded(), 5);
    let out = captured.contents();
    assert!(out.contains("✓ Error handled: AuthenticationError: invalid x-api-key\n"));
    assert!(out.ends_with("Completed 5/6 demos successfully.\n"));
}
