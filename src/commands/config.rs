use anyhow::Result;
use colored::Colorize;
use gpu_pricing::config::{Config, ENV_PREFIX};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration after file and environment layering
pub fn show(cfg: &Config, path: &Path) -> Result<()> {
    info!("Displaying configuration");

    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };

    println!("{}", "Current Configuration:".green().bold());
    println!("  {} {}", "File:".cyan(), source);
    println!("  {} {}__*", "Env:".cyan(), ENV_PREFIX);
    println!();

    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    if cfg.catalog.path.is_none() {
        println!("{}", "# catalog.path unset: using the embedded catalog".dimmed());
    }

    Ok(())
}
