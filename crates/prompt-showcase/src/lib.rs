// prompt-showcase: sequential demo runner, Anthropic client, and the demo suites
#![allow(clippy::result_large_err)]

pub mod app;
pub mod cli;
pub mod console;
pub mod demos;
pub mod providers;
pub mod runner;
pub mod setup;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub(crate) mod util;

// --- Curated re-exports from prompt-showcase-types ---
pub use prompt_showcase_types::{
    AdapterTimeout,
    // Type aliases
    BoxFuture,
    // Completions
    Completion,
    // Service trait
    CompletionService,
    // Errors
    Error,
    ErrorKind,
    // Messages
    Message,
    Role,
    // Config
    ServiceConfig,
    Usage,
};

// --- Runner at crate root ---
pub use runner::{RunReport, Runner, UnitOutcome, UnitRecord, UnitState, WorkUnit};

pub use app::{Exit, run_showcase};
pub use cli::Args;
pub use console::Console;
pub use demos::{DEMOS, Demo, DemoContext, Suite, suite_units};
pub use providers::AnthropicService;
