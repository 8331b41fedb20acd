//! Roster CLI entry point.

use anyhow::Result;
use clap::Parser;

use roster::cli::{commands, handle_error, Cli, Commands};
use roster::domain::models::Config;
use roster::infrastructure::config::ConfigLoader;
use roster::infrastructure::logging::{init_cli_logging, LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json_mode);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Init runs before any config file exists.
    if let Commands::Init(args) = cli.command {
        init_cli_logging("warn");
        return commands::init::execute(args, cli.json).await;
    }

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Serve(args) => {
            let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;
            commands::serve::execute(args, config).await
        }
        Commands::Employee(args) => {
            init_cli_logging(&config.logging.level);
            commands::employee::execute(args, &config, cli.json).await
        }
        Commands::Catalog(args) => {
            init_cli_logging(&config.logging.level);
            commands::catalog::execute(args, &config, cli.json).await
        }
        // Handled before config loading.
        Commands::Init(_) => Ok(()),
    }
}
