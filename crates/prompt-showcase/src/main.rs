use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use prompt_showcase::{Args, Console, run_showcase};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let console = Console::stdout();

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => on_signal.cancel(),
            Err(e) => tracing::warn!(error = %e, "could not listen for ctrl-c"),
        }
    });

    match run_showcase(&args, &console, &cancel).await {
        Ok(exit) => ExitCode::from(exit.code(args.fail_on_error)),
        Err(e) => {
            tracing::error!(error = %e, "showcase aborted");
            console.line(format!("\nDemo failed: {e:#}"));
            ExitCode::FAILURE
        }
    }
}
