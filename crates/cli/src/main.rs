mod commands;
mod logger;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use sitegen_core::load_site_config;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitegen")]
#[command(version, about = "Content generator for the dealer website", long_about = None)]
struct Cli {
    /// Site root holding content/, static/, data/ and sitegen.toml
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    /// Log every file processed
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate product pages from data/produits.csv
    Products,

    /// Generate manual pages from the PDFs under static/pdf/manuels
    Manuals,

    /// Process product folders (info.yaml + images + PDFs)
    ProductBundles,

    /// Process manual folders (info.yaml + PDFs + images)
    ManualBundles,

    /// Build static/search-index.json from the content tree
    SearchIndex,

    /// Run every step in build order
    All,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    if let Command::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "sitegen", &mut io::stdout());
        return Ok(());
    }

    let config = load_site_config(&cli.root)
        .with_context(|| format!("Failed to load configuration from {}", cli.root.display()))?;
    tracing::debug!(root = %config.root.display(), "configuration loaded");

    match cli.command {
        Command::Products => commands::products::run(&config),
        Command::Manuals => commands::manuals::run(&config),
        Command::ProductBundles => commands::bundles::run_products(&config),
        Command::ManualBundles => commands::bundles::run_manuals(&config),
        Command::SearchIndex => commands::search::run(&config),
        Command::All => commands::all::run(&config),
        Command::Completions { .. } => Ok(()),
    }
}
