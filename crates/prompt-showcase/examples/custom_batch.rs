/// Run a hand-built batch through the sequential runner.
///
/// One unit fails on purpose and another returns an error; the batch still
/// runs to the end and prints `Completed 2/4 checks successfully.`
/// No API key is needed.
use std::time::Duration;

use prompt_showcase::{Console, Error, Runner, WorkUnit};

#[tokio::main]
async fn main() {
    let console = Console::stdout();

    let units = vec![
        WorkUnit::new("warm up", || async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(true)
        }),
        WorkUnit::new("flaky dependency", || async {
            Err(Error::configuration("dependency not configured"))
        }),
        WorkUnit::new("self-checked", {
            let console = console.clone();
            move || async move {
                console.line("self-checked: value out of range, skipping");
                Ok(false)
            }
        }),
        WorkUnit::new("cool down", || async { Ok(true) }),
    ];

    let report = Runner::new(console).noun("checks").run(units).await;
    for record in report.records() {
        println!(
            "{:<18} {:<10} {:?}",
            record.label,
            record.outcome.state().as_str(),
            record.elapsed
        );
    }
}
