//! Single-tool subcommands

use crate::output::print_steps;
use colored::Colorize;
use stepwise::tools::{Calculator, Translator};
use stepwise::{IntentExtractor, StepwiseConfig};

pub fn calc(text: &str) -> anyhow::Result<()> {
    let Some(request) = Calculator::detect(text) else {
        println!("{} No calculation found in: {}", "✗".red(), text);
        return Ok(());
    };

    let result = Calculator::new().apply(
        request.operator.symbol(),
        request.operand1,
        request.operand2,
    );
    println!("{}", Calculator::format_result(&result));
    Ok(())
}

/// Uses the quoted phrase when the text is a translation request,
/// otherwise the whole text.
pub fn translate(text: &str) -> anyhow::Result<()> {
    let phrase = Translator::detect(text)
        .map(|request| request.phrase)
        .unwrap_or_else(|| text.trim().to_string());

    let result = Translator::new().lookup(&phrase);
    println!("{}", Translator::format_result(&result));
    Ok(())
}

pub fn extract(config: &StepwiseConfig, query: &str) -> anyhow::Result<()> {
    let extractor = IntentExtractor::with_options(config.tools.extractor_options());
    print_steps(&extractor.extract(query));
    Ok(())
}
