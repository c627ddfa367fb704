//! `stepwise config`

use colored::Colorize;
use stepwise::{ConfigLoader, StepwiseConfig};

pub fn show(config: &StepwiseConfig, loader: &ConfigLoader) -> anyhow::Result<()> {
    println!("{}", "Configuration files".bold().underline());
    match loader.user_config_path() {
        Some(path) => println!("  user:    {} ({})", path.display(), presence(path)),
        None => println!("  user:    (no home directory)"),
    }
    let project = loader.project_config_path();
    println!("  project: {} ({})", project.display(), presence(project));

    println!("\n{}", "Effective configuration".bold().underline());
    println!("{}", config.to_redacted_toml()?);

    let warnings = config.validate();
    if !warnings.is_empty() {
        println!("{}", "Warnings".bold().underline());
        for warning in warnings {
            println!("  {} {}", "⚠".yellow(), warning);
        }
    }
    Ok(())
}

fn presence(path: &std::path::Path) -> &'static str {
    if path.exists() {
        "found"
    } else {
        "not found"
    }
}
