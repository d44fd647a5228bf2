use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use gpu_pricing::ProviderCatalog;

use super::print_disclaimer;

/// Execute the providers command
///
/// Lists every provider in catalog order with its GPU coverage
pub fn execute(catalog: &ProviderCatalog) -> Result<()> {
    println!("Pricing Catalog");
    println!("===============\n");

    match catalog.last_updated() {
        Some(date) => println!("  Last updated:  {}", date),
        None => println!("  Last updated:  unknown"),
    }
    println!(
        "  Providers:     {} ({} GPU models)",
        catalog.len(),
        catalog.gpu_model_count()
    );
    println!();

    println!("{}", build_providers_table(catalog));
    println!();
    print_disclaimer();

    Ok(())
}

fn build_providers_table(catalog: &ProviderCatalog) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("PROVIDER").fg(Color::Cyan),
        Cell::new("TYPE").fg(Color::Cyan),
        Cell::new("GPUS").fg(Color::Cyan),
        Cell::new("WITH SPOT").fg(Color::Cyan),
        Cell::new("MODELS").fg(Color::Cyan),
    ]);

    for provider in catalog.iter() {
        let models: Vec<&str> = provider.gpus.keys().map(String::as_str).collect();
        table.add_row(vec![
            Cell::new(&provider.name),
            Cell::new(provider.provider_type),
            Cell::new(provider.gpus.len()),
            Cell::new(provider.spot_count()),
            Cell::new(models.join(", ")),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_providers_table_includes_every_provider() {
        let catalog = ProviderCatalog::builtin().unwrap();
        let rendered = build_providers_table(&catalog).to_string();

        for provider in catalog.iter() {
            assert!(rendered.contains(&provider.name), "missing {}", provider.name);
        }
    }
}
