use anyhow::Result;
use colored::Colorize;
use gpu_pricing::ProviderCatalog;
use tracing::info;

/// Execute the validate command
///
/// Checks every rate in the catalog and fails when any issue is found
pub fn execute(catalog: &ProviderCatalog) -> Result<()> {
    println!("{}", "Validating pricing catalog...".yellow());
    info!("Validating {} providers", catalog.len());

    let issues = catalog.validate();

    if issues.is_empty() {
        println!("{}", "✓ Catalog is valid".green());
        println!();
        println!("{}", "Summary:".bold());
        println!("  {}: {}", "Providers".cyan(), catalog.len());
        println!("  {}: {}", "GPU Models".cyan(), catalog.gpu_model_count());
        if let Some(date) = catalog.last_updated() {
            println!("  {}: {}", "Last Updated".cyan(), date);
        }
        return Ok(());
    }

    println!(
        "{}",
        format!("✗ Found {} issue(s):", issues.len()).red().bold()
    );
    for (idx, issue) in issues.iter().enumerate() {
        println!("  {}. {}", idx + 1, issue);
    }

    anyhow::bail!("Catalog validation failed with {} issue(s)", issues.len())
}
