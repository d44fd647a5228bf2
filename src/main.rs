use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use gpu_pricing::catalog::load_catalog;
use gpu_pricing::config::Config;
use gpu_pricing::{config, init_tracing, ProviderCatalog};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();
    let command = args.get_command();
    let json = command.wants_json();

    let result = run(&args, command);
    if let Err(e) = &result {
        // --json callers get the failure on stdout in the same shape as success output
        if json {
            println!("{}", serde_json::to_string_pretty(&commands::json_error(e))?);
        }
    }
    result
}

fn run(args: &cli::Cli, command: cli::Commands) -> Result<()> {
    // Configuration decides the default log level, so it is loaded first
    let cfg = config::load_config(&args.config)?;
    init_tracing(&cfg.log.level);

    // Only commands that price something need the catalog
    let catalog = |cfg: &Config| -> Result<ProviderCatalog> {
        let today = chrono::Local::now().date_naive();
        Ok(load_catalog(&cfg.catalog, today)?)
    };

    // Dispatch to appropriate command handler
    match command {
        cli::Commands::Quote {
            gpu,
            hours,
            tier,
            json,
        } => {
            commands::quote::execute(&cfg, &catalog(&cfg)?, gpu, hours, tier, json)?;
        }
        cli::Commands::Gpus { json } => {
            commands::gpus::execute(&catalog(&cfg)?, json)?;
        }
        cli::Commands::Providers => {
            commands::providers::execute(&catalog(&cfg)?)?;
        }
        cli::Commands::Validate => {
            commands::validate::execute(&catalog(&cfg)?)?;
        }
        cli::Commands::Share { gpu, hours, parse } => {
            commands::share::execute(&cfg, gpu, hours, parse)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg, &args.config)?,
        },
        cli::Commands::Version => {
            println!("GPU Pricing v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
