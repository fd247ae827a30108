//! Grocer CLI - compare supermarket prices and build a shareable buy list
//!
//! The buy list lives entirely in the URL fragment: every command reads the
//! list from `--url` (or `GROCER_URL`) and prints the rewritten URL.

mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::add::{run_add, run_add_offer, ManualOffer};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::list::{run_remove, run_show, run_toggle};
use crate::commands::search::run_search;
use crate::commands::share::run_share;
use crate::config::CliConfig;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let directive = "grocer=info"
        .parse()
        .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load().map_err(CliError::Config)?;
    let url = cli.url.as_deref();

    match cli.command {
        Commands::Search { query, json } => run_search(&query.join(" "), json, &config).await?,
        Commands::Add { query, pick } => run_add(&query.join(" "), pick, url, &config).await?,
        Commands::AddOffer {
            id,
            name,
            store,
            price,
            quantity,
            discount,
        } => {
            let offer = ManualOffer {
                id,
                name,
                store,
                price,
                quantity,
                discount,
            };
            run_add_offer(offer, url, &config)?;
        }
        Commands::Remove { id } => run_remove(&id, url, &config)?,
        Commands::Toggle { id } => run_toggle(&id, url, &config)?,
        Commands::Show { json } => run_show(json, url, &config)?,
        Commands::Share { print } => run_share(print, url, &config)?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
        Commands::Config { command } => run_config(command)?,
    }

    Ok(())
}
