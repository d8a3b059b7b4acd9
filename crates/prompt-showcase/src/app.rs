// Top-level flow: banner, credentials, client, optional CLI probe, run.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use prompt_showcase_types::{CompletionService, ErrorKind};

use crate::cli::Args;
use crate::console::Console;
use crate::demos::suite_units;
use crate::providers::AnthropicService;
use crate::runner::{RunReport, Runner};
use crate::setup;

/// How a showcase invocation ended.
#[derive(Debug)]
pub enum Exit {
    /// Every demo was attempted.
    Completed(RunReport),
    /// No API key; nothing was run.
    MissingCredentials,
    /// Stopped by the user before the run finished.
    Interrupted,
}

impl Exit {
    /// Process exit status for this outcome.
    pub fn code(&self, fail_on_error: bool) -> u8 {
        match self {
            Self::Completed(report) if fail_on_error && !report.all_succeeded() => 1,
            Self::Completed(_) => 0,
            Self::MissingCredentials => 1,
            Self::Interrupted => 130,
        }
    }
}

/// Run the showcase described by `args`, printing to `console`.
///
/// Errors cover setup failures only; demo failures are part of the report.
pub async fn run_showcase(
    args: &Args,
    console: &Console,
    cancel: &CancellationToken,
) -> anyhow::Result<Exit> {
    let suite = args.suite;
    console.line(format!("{} Starting...", suite.title()));
    console.rule(50);

    let Some(api_key) = setup::load_api_key(&args.env_file, console) else {
        return Ok(Exit::MissingCredentials);
    };

    let service = AnthropicService::new(api_key, args.service_config())
        .context("failed to create the completion client")?;
    console.line("✓ Completion client ready");
    tracing::info!(model = service.model(), base_url = service.base_url(), "client ready");

    if suite.checks_cli() {
        setup::check_claude_cli(console).await;
    }

    let service: Arc<dyn CompletionService> = Arc::new(service);
    let units = suite_units(suite, service, console.clone());
    let runner = Runner::new(console.clone())
        .noun("demos")
        .unit_kind("demo")
        .interrupt_notice("\n\nDemo interrupted by user");

    match runner.run_until_cancelled(units, cancel).await {
        Ok(report) => Ok(Exit::Completed(report)),
        Err(e) if e.kind == ErrorKind::Interrupted => Ok(Exit::Interrupted),
        Err(e) => Err(e).context("demo run failed"),
    }
}
