//! One-shot queries and the scripted demo

use crate::output::{print_answer, print_header, print_progress};
use stepwise::{build_orchestrator, StepwiseConfig};

const DEMO_QUERIES: &[&str] = &[
    "Translate \"Sunshine\" into German.",
    "Translate \"Good Morning\" into German and then multiply 5 and 6.",
    "Add 2 and 2 and multiply 3 and 3.",
    "What is the distance between Earth and Mars?",
    "Add 10 and 20, then tell me the capital of Italy.",
];

pub async fn run(config: &StepwiseConfig, query: &str, show_trace: bool) -> anyhow::Result<()> {
    let orchestrator = build_orchestrator(config)?;
    let response = orchestrator.handle(query).await;

    println!("{}", response.text);
    if show_trace {
        println!("\n{}", serde_json::to_string_pretty(&response.trace)?);
    }
    Ok(())
}

pub async fn demo(config: &StepwiseConfig) -> anyhow::Result<()> {
    let orchestrator = build_orchestrator(config)?;

    for (i, query) in DEMO_QUERIES.iter().enumerate() {
        print_header(&format!("Demo {}/{}: {}", i + 1, DEMO_QUERIES.len(), query));
        let response = orchestrator.handle_with_progress(query, print_progress).await;
        print_answer(&response.text);
    }
    Ok(())
}
