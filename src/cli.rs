use clap::{Parser, Subcommand};
use gpu_pricing::Tier;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gpu-pricing", version, about = "Compare GPU rental prices across providers")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "gpu-pricing.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rank providers by the cost of renting a GPU (default)
    Quote {
        /// GPU model, e.g. "H100 SXM5" (see `gpus`)
        #[arg(short, long)]
        gpu: Option<String>,

        /// Number of hours; invalid or negative values count as zero
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        hours: Option<String>,

        /// Pricing tier to rank by: best, on-demand or spot
        #[arg(short, long)]
        tier: Option<Tier>,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// List every GPU model in the catalog
    Gpus {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// List catalog providers
    Providers,

    /// Check catalog rates for data-quality problems
    Validate,

    /// Build or decode a shareable link
    Share {
        /// GPU model to encode
        #[arg(short, long)]
        gpu: Option<String>,

        /// Hours to encode, kept verbatim
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        hours: Option<String>,

        /// Decode this link instead of building one
        #[arg(long, conflicts_with_all = ["gpu", "hours"])]
        parse: Option<String>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,
}

impl Cli {
    /// Get the command to execute, defaulting to Quote if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Quote {
            gpu: None,
            hours: None,
            tier: None,
            json: false,
        })
    }
}

impl Commands {
    /// Whether the command was asked for JSON output, errors included
    pub fn wants_json(&self) -> bool {
        match self {
            Commands::Quote { json, .. } | Commands::Gpus { json } => *json,
            _ => false,
        }
    }
}
