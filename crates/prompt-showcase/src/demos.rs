// Demo catalog: the prompts the showcase sends, packaged as work units.

use std::sync::Arc;

use prompt_showcase_types::{Completion, CompletionService, Error, Message};

use crate::console::Console;
use crate::runner::WorkUnit;

const HELLO_PROMPT: &str = "Say hello and briefly introduce yourself as Claude";

const CODE_GENERATION_PROMPT: &str =
    "Write a Python function to reverse a string with error handling";

const REVIEW_SAMPLE: &str = r#"
def process_data(data):
    result = []
    for i in range(len(data)):
        if data[i] > 0:
            result.append(data[i] * 2)
    return result
"#;

const BUGGY_SAMPLE: &str = r#"
def divide_numbers(a, b):
    return a / b

# This causes an error
result = divide_numbers(10, 0)
print(result)
"#;

const CALCULATOR_PROMPT: &str =
    "Help me design a simple calculator class. Start with the basic structure.";

const CALCULATOR_FOLLOW_UP: &str = "Now add methods for basic arithmetic operations.";

const ERROR_GUIDE_PROMPT: &str = "Write a brief guide on Python error handling";

/// Characters of each multi-turn reply shown before truncation.
const TURN_PREVIEW_CHARS: usize = 300;

/// Characters of the error-handling reply shown.
const GUIDE_PREVIEW_CHARS: usize = 200;

/// Which set of demos to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Suite {
    /// Hello world, code generation, code review, debugging help.
    Simple,
    /// Every demo, including multi-turn and error handling.
    Full,
}

impl Suite {
    /// Banner title printed before the run.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Simple => "Simple Claude API Demo",
            Self::Full => "Claude API Demo",
        }
    }

    pub fn demos(&self) -> &'static [Demo] {
        match self {
            Self::Simple => &DEMOS[..4],
            Self::Full => &DEMOS,
        }
    }

    /// Whether the optional `claude` CLI check runs before this suite.
    pub fn checks_cli(&self) -> bool {
        matches!(self, Self::Full)
    }
}

/// One entry of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demo {
    pub number: usize,
    /// Unit label used by the runner.
    pub label: &'static str,
    /// Heading printed when the demo starts.
    pub title: &'static str,
    kind: DemoKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DemoKind {
    HelloWorld,
    CodeGeneration,
    CodeReview,
    DebuggingHelp,
    MultiTurn,
    ErrorHandling,
}

pub static DEMOS: [Demo; 6] = [
    Demo {
        number: 1,
        label: "Hello World",
        title: "Hello World",
        kind: DemoKind::HelloWorld,
    },
    Demo {
        number: 2,
        label: "Code Generation",
        title: "Code Generation",
        kind: DemoKind::CodeGeneration,
    },
    Demo {
        number: 3,
        label: "Code Review",
        title: "Code Review",
        kind: DemoKind::CodeReview,
    },
    Demo {
        number: 4,
        label: "Debugging Help",
        title: "Debugging Help",
        kind: DemoKind::DebuggingHelp,
    },
    Demo {
        number: 5,
        label: "Multi-turn",
        title: "Multi-turn Conversation",
        kind: DemoKind::MultiTurn,
    },
    Demo {
        number: 6,
        label: "Error Handling",
        title: "Error Handling",
        kind: DemoKind::ErrorHandling,
    },
];

/// Everything a demo needs while it runs.
#[derive(Clone)]
pub struct DemoContext {
    service: Arc<dyn CompletionService>,
    console: Console,
}

impl DemoContext {
    pub fn new(service: Arc<dyn CompletionService>, console: Console) -> Self {
        Self { service, console }
    }

    async fn ask(&self, prompt: impl Into<String>) -> Result<Completion, Error> {
        let conversation = [Message::user(prompt)];
        self.service.complete(&conversation).await
    }

    /// Print the diagnostic for a handled failure and report it as `false`.
    fn handled(&self, demo: &Demo, err: &Error) -> bool {
        tracing::warn!(
            demo = demo.label,
            class = failure_class(err),
            retryable = err.retryable,
            retry_after_secs = err.retry_after.map(|d| d.as_secs_f64()),
            error = %err,
            "demo request failed"
        );
        self.console.line(format!("❌ Error: {err}"));
        false
    }
}

impl Demo {
    /// Run this demo. Service failures are handled here and reported as
    /// `Ok(false)`.
    pub async fn run(&self, ctx: &DemoContext) -> Result<bool, Error> {
        ctx.console
            .line(format!("\n=== Demo {}: {} ===", self.number, self.title));
        let succeeded = match self.kind {
            DemoKind::HelloWorld => self.single_prompt(ctx, HELLO_PROMPT, None).await,
            DemoKind::CodeGeneration => {
                self.single_prompt(ctx, CODE_GENERATION_PROMPT, Some("Generated Code:"))
                    .await
            }
            DemoKind::CodeReview => {
                let prompt =
                    format!("Review this Python code and suggest improvements:\n\n{REVIEW_SAMPLE}");
                self.single_prompt(ctx, prompt, Some("Code Review:")).await
            }
            DemoKind::DebuggingHelp => {
                let prompt = format!(
                    "This code has a bug. Explain the issue and provide a fix:\n\n{BUGGY_SAMPLE}"
                );
                self.single_prompt(ctx, prompt, Some("Debugging Help:"))
                    .await
            }
            DemoKind::MultiTurn => self.multi_turn(ctx).await,
            DemoKind::ErrorHandling => self.error_handling(ctx).await,
        };
        Ok(succeeded)
    }

    /// Package this demo as a runner work unit.
    pub fn unit(&self, ctx: DemoContext) -> WorkUnit {
        let demo = *self;
        WorkUnit::new(self.label, move || async move { demo.run(&ctx).await })
    }

    /// Send one prompt and print the reply under `heading`, or inline after
    /// `Claude: ` when there is no heading.
    async fn single_prompt(
        &self,
        ctx: &DemoContext,
        prompt: impl Into<String>,
        heading: Option<&str>,
    ) -> bool {
        match ctx.ask(prompt).await {
            Ok(reply) => {
                match heading {
                    Some(heading) => {
                        ctx.console.line(heading);
                        ctx.console.line(&reply.text);
                    }
                    None => ctx.console.line(format!("Claude: {}", reply.text)),
                }
                true
            }
            Err(err) => ctx.handled(self, &err),
        }
    }

    async fn multi_turn(&self, ctx: &DemoContext) -> bool {
        let mut conversation = vec![Message::user(CALCULATOR_PROMPT)];
        let conversation_result: Result<(), Error> = async {
            let first = ctx.service.complete(&conversation).await?;
            ctx.console.line("\nTurn 1:");
            ctx.console.line(preview(&first.text, TURN_PREVIEW_CHARS));

            conversation.push(Message::assistant(first.text));
            conversation.push(Message::user(CALCULATOR_FOLLOW_UP));

            let second = ctx.service.complete(&conversation).await?;
            ctx.console.line("\nTurn 2:");
            ctx.console.line(preview(&second.text, TURN_PREVIEW_CHARS));

            ctx.console.line("\nCompleted 2 turns");
            Ok(())
        }
        .await;

        match conversation_result {
            Ok(()) => true,
            Err(err) => ctx.handled(self, &err),
        }
    }

    async fn error_handling(&self, ctx: &DemoContext) -> bool {
        match ctx.ask(ERROR_GUIDE_PROMPT).await {
            Ok(reply) => {
                ctx.console.line("Success!");
                ctx.console
                    .line(format!("{}...", head(&reply.text, GUIDE_PREVIEW_CHARS)));
                true
            }
            Err(err) => {
                ctx.console
                    .line(format!("✓ Error handled: {}: {}", err.kind, err.message));
                false
            }
        }
    }
}

/// Coarse bucket for a failed request, logged with every handled failure.
///
/// `transient` means the service refused for now and a later rerun may pass;
/// `rejected` means the service refused the request itself; `local` covers
/// transport, parsing and configuration problems on this side.
pub(crate) fn failure_class(err: &Error) -> &'static str {
    match (err.kind.is_service_error(), err.retryable) {
        (true, true) => "transient",
        (true, false) => "rejected",
        (false, _) => "local",
    }
}

/// Build the work units for `suite`, in catalog order.
pub fn suite_units(
    suite: Suite,
    service: Arc<dyn CompletionService>,
    console: Console,
) -> Vec<WorkUnit> {
    let ctx = DemoContext::new(service, console);
    suite
        .demos()
        .iter()
        .map(|demo| demo.unit(ctx.clone()))
        .collect()
}

/// The first `max` characters of `text`, never splitting a character.
pub fn head(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// `text` cut to `max` characters with `...` appended, or unchanged when it
/// already fits.
pub fn preview(text: &str, max: usize) -> String {
    let shown = head(text, max);
    if shown.len() < text.len() {
        format!("{shown}...")
    } else {
        text.to_string()
    }
}
