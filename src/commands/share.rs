use anyhow::Result;
use colored::Colorize;
use gpu_pricing::config::Config;
use gpu_pricing::pricing::Hours;
use gpu_pricing::share::ShareParams;

/// Execute the share command
///
/// Builds a link from `gpu`/`hours`, or decodes `parse` when given
pub fn execute(
    cfg: &Config,
    gpu: Option<String>,
    hours: Option<String>,
    parse: Option<String>,
) -> Result<()> {
    if let Some(link) = parse {
        let params = ShareParams::from_url(&link)?;
        println!("  {}   {}", "GPU:".cyan(), params.gpu.as_deref().unwrap_or("-"));
        match params.hours.as_deref() {
            Some(raw) => println!("  {} {} ({} h)", "Hours:".cyan(), raw, Hours::parse(raw)),
            None => println!("  {} -", "Hours:".cyan()),
        }
        return Ok(());
    }

    let gpu = gpu.or_else(|| cfg.defaults.gpu.clone());
    let hours = hours.or_else(|| Some(cfg.defaults.hours.clone()));
    let url = ShareParams::new(gpu, hours).to_url(&cfg.share.base_url)?;
    println!("{}", url);

    Ok(())
}
