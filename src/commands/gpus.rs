use anyhow::Result;
use gpu_pricing::pricing::list_gpu_models;
use gpu_pricing::ProviderCatalog;

/// Execute the gpus command
pub fn execute(catalog: &ProviderCatalog, json: bool) -> Result<()> {
    let models = list_gpu_models(catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else {
        for model in &models {
            println!("{}", model);
        }
    }

    Ok(())
}
