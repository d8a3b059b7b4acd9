// Setup: credentials from `.env` and the optional `claude` CLI probe.

use std::path::Path;

use secrecy::SecretString;

use crate::console::Console;
use crate::providers::anthropic::API_KEY_ENV;

/// Load `env_file` (when present) into the process environment, then read
/// the API key. Variables already set in the environment win over the file.
///
/// Prints whether a key was found. Empty values count as missing.
pub fn load_api_key(env_file: &Path, console: &Console) -> Option<SecretString> {
    match dotenvy::from_path(env_file) {
        Ok(()) => tracing::debug!(path = %env_file.display(), "loaded env file"),
        Err(e) if e.not_found() => {
            tracing::debug!(path = %env_file.display(), "no env file");
        }
        Err(e) => {
            tracing::warn!(path = %env_file.display(), error = %e, "could not read env file");
        }
    }

    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => {
            console.line("✓ API key configured from .env file");
            Some(SecretString::from(key))
        }
        _ => {
            console.line("❌ No API key found in .env file");
            console.line(format!(
                "Please set {API_KEY_ENV} in {}",
                env_file.display()
            ));
            None
        }
    }
}

/// Result of probing for the `claude` command-line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliStatus {
    /// The tool ran; carries its trimmed `--version` output.
    Installed(String),
    /// The executable exists but `--version` failed.
    Unavailable,
    /// No executable on `PATH`.
    Missing,
}

/// Probe the `claude` CLI. Informational only; never fails the run.
pub async fn check_claude_cli(console: &Console) -> CliStatus {
    check_cli("claude", console).await
}

pub(crate) async fn check_cli(program: &str, console: &Console) -> CliStatus {
    let output = tokio::process::Command::new(program)
        .arg("--version")
        .kill_on_drop(true)
        .output()
        .await;

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            console.line("✓ Claude CLI is installed");
            CliStatus::Installed(version)
        }
        Ok(out) => {
            tracing::debug!(program, status = %out.status, "version probe failed");
            console.line("ℹ️ Claude CLI not found (optional)");
            CliStatus::Unavailable
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            console.line("ℹ️ Claude CLI not found (optional)");
            console.line("Install with: npm install -g @anthropic-ai/claude-code");
            CliStatus::Missing
        }
        Err(e) => {
            tracing::warn!(program, error = %e, "could not run version probe");
            console.line("ℹ️ Claude CLI not found (optional)");
            CliStatus::Unavailable
        }
    }
}
