// recwatch/src/main.rs

mod cli;
mod logic;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use logic::client::render;
use logic::config::PollConfig;
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Allow RECWATCH_HOST / RECWATCH_PORT / RECWATCH_BASE_URL to override flags
    let host = std::env::var("RECWATCH_HOST").unwrap_or_else(|_| args.host.clone());
    let port = std::env::var("RECWATCH_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(args.port);
    let base_url = std::env::var("RECWATCH_BASE_URL").ok().or(args.base_url);

    // A base URL must carry its protocol; reject garbage before the first poll
    if let Some(base) = &base_url {
        Url::parse(base).with_context(|| format!("invalid base URL `{base}`"))?;
    }

    match args.command {
        Commands::List {
            format,
            sort,
            status,
            watch,
            interval,
            extended,
            config,
            request_timeout,
        } => {
            // Layering: defaults -> config file -> environment -> CLI args
            let poll_config = if let Some(config_path) = config {
                PollConfig::from_file(&config_path)?
                    .layer_env()
                    .layer_args(interval, request_timeout)
            } else {
                PollConfig::from_args_and_env(interval, request_timeout)
            };

            render::run(
                host,
                port,
                base_url,
                format,
                sort,
                status,
                watch,
                extended,
                poll_config,
            )
            .await?
        }

        Commands::Summary { format } => {
            let poll_config = PollConfig::from_args_and_env(None, None);
            render::run_summary(host, port, base_url, format, poll_config).await?
        }
    }

    Ok(())
}
