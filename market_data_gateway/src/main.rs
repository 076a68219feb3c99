use std::error::Error;

use clap::Parser;
use market_data_gateway::{
    cli::{
        commands::{Cli, Commands},
        params::read_params,
    },
    config::{GatewayConfig, read_config},
    dispatch::{TOOLS, Tool, dispatch},
    providers::alpha_vantage::AlphaVantageProvider,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // stdout carries the JSON answer only
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("market_data_gateway=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Tools => {
            for (name, _) in TOOLS {
                println!("{name}");
            }
        }

        Commands::Call { tool, source, input } => {
            let Some(tool) = Tool::from_name(&tool) else {
                return Err(format!("Unknown tool: {tool}").into());
            };
            let params = read_params(source, &input)?;

            let config = match &cli.config {
                Some(path) => read_config(path)?,
                None => GatewayConfig::default(),
            };
            let provider = AlphaVantageProvider::new(&config.alpha_vantage)?;

            let answer = dispatch(&provider, tool, params).await?;
            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
    }

    Ok(())
}
