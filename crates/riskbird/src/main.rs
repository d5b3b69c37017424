//! `riskbird`: command-line front end for `riskbird-fetch`.

mod cli;
mod config;

use anyhow::Context;
use clap::Parser;
use riskbird_fetch::{Category, Client, HttpClient};
use serde_json::Value;

use crate::cli::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load(&cli)?;

    #[cfg(feature = "chrome-tls")]
    let client = Client::chrome(config).context("failed to set up HTTP client")?;
    #[cfg(not(feature = "chrome-tls"))]
    let client = Client::new(config).context("failed to set up HTTP client")?;

    let output = run(&client, cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run<C: HttpClient>(client: &Client<C>, command: Command) -> anyhow::Result<Value> {
    let output = match command {
        Command::Search { keyword } => {
            let results = client
                .search(&keyword)
                .await
                .with_context(|| format!("search for {keyword:?} failed"))?;
            tracing::info!(keyword, count = results.len(), "search finished");
            serde_json::to_value(results)?
        }
        Command::Info { entity } => {
            let info = client
                .entity_info(&entity)
                .await
                .with_context(|| format!("failed to load entity {entity}"))?;
            serde_json::to_value(info)?
        }
        Command::Page { entity, category, page } => {
            let page = client
                .fetch_page(&entity, page, category)
                .await
                .with_context(|| format!("failed to fetch page {page} of {category} for {entity}"))?;
            serde_json::to_value(page)?
        }
        Command::All { entity, category } => {
            let records = client
                .fetch_all(&entity, category)
                .await
                .with_context(|| format!("failed to fetch {category} for {entity}"))?;
            tracing::info!(entity, %category, count = records.len(), "category fetched");
            Value::Array(records)
        }
        Command::Collect { entity, categories } => {
            let categories = if categories.is_empty() {
                Category::ALL.to_vec()
            } else {
                categories
            };
            let collected = client
                .collect(&entity, &categories)
                .await
                .with_context(|| format!("collection for {entity} failed"))?;
            serde_json::to_value(collected)?
        }
    };

    Ok(output)
}
