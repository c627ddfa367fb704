//! Terminal rendering shared by the subcommands

use colored::Colorize;
use stepwise::{Progress, StepOutcome, SubTask};

pub fn print_banner(backend: &str, tools: &[&str]) {
    println!("{}", "=".repeat(60));
    println!("{}", "stepwise - multi-step assistant".bold());
    println!("{}", "=".repeat(60));
    println!("Ask for calculations, German translations or general knowledge,");
    println!("several at once if you like. Type 'quit' to exit.");
    println!("LLM Provider: {}", backend.cyan());
    println!("Available Tools: {}", tools.join(", "));
    println!("{}", "=".repeat(60));
}

/// Live progress for a query being processed
pub fn print_progress(event: Progress<'_>) {
    match event {
        Progress::Extracted(steps) => {
            println!("\n{} Identified {} task(s):", "→".cyan(), steps.len());
            for (i, step) in steps.iter().enumerate() {
                println!("   {}. {}", i + 1, step.description);
            }
            println!("\n{} Executing tasks...", "→".cyan());
        }
        Progress::StepStarted { index, step, .. } => {
            println!("   {}. Executing: {}", index, step.description);
        }
        Progress::StepFinished { step, .. } => match step.outcome() {
            StepOutcome::Success(_) => println!("      {}", "✓ Completed".green()),
            StepOutcome::Failure(reason) => {
                println!("      {} {}", "✗ Failed:".red(), reason)
            }
            StepOutcome::NotRun => println!("      {}", "- Not run".yellow()),
        },
        Progress::Synthesizing => println!("\n{} Synthesizing results...", "→".cyan()),
    }
}

pub fn print_answer(text: &str) {
    println!("\n{}\n{}", "Answer:".bold(), text);
}

/// Sub-tasks with their capability and parameters
pub fn print_steps(steps: &[SubTask]) {
    for (i, step) in steps.iter().enumerate() {
        let params = serde_json::Value::Object(step.parameters.clone());
        println!(
            "{}. {} [{}] {}",
            i + 1,
            step.description.bold(),
            step.capability.to_string().cyan(),
            params
        );
    }
}

pub fn print_header(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", title.bold());
    println!("{}", "=".repeat(60));
}
