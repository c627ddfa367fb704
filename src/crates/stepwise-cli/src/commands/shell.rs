//! Interactive shell

use crate::output::{print_answer, print_banner, print_progress};
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;
use stepwise::{build_orchestrator_with_sink, MemoryAuditLog, StepwiseConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

pub async fn run(config: &StepwiseConfig) -> anyhow::Result<()> {
    let history = Arc::new(MemoryAuditLog::new());
    let orchestrator = build_orchestrator_with_sink(config, history.clone())?;

    let mut tools = vec!["LLM"];
    if config.tools.calculator_enabled {
        tools.insert(0, "Calculator");
    }
    if config.tools.translator_enabled {
        tools.insert(tools.len() - 1, "Translator");
    }
    print_banner(orchestrator.backend_label(), &tools);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n{} ", "You:".bold().blue());
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let input = line.trim();
        match input.to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "history" => {
                println!("Processed {} queries this session.", history.len());
                for record in history.records() {
                    println!(
                        "  {} {} ({}/{} tasks)",
                        record.trace.timestamp.format("%H:%M:%S"),
                        record.trace.query,
                        record.trace.completed_count(),
                        record.trace.total_count()
                    );
                }
                continue;
            }
            _ => {}
        }

        let response = orchestrator.handle_with_progress(input, print_progress).await;
        print_answer(&response.text);
        debug!(trace_id = %response.trace.id, "Shell query answered");
    }

    println!("\nGoodbye!");
    Ok(())
}
