//! Main binary entry point for the AMM deployer
//!
//! Loads `.env`, sets up logging, parses the command line and dispatches to
//! the deployment operations. Any error is reported once here and turns into
//! exit code 1.

use amm_deploy::{
	cli::{output::Display, Cli, Commands},
	core::logging::{init_logging, operation_error, operation_start},
	list_networks, DeployOps,
};
use anyhow::{Context, Result};
use clap::Parser;
use deployer_config::Config;
use std::path::Path;
use std::process::ExitCode;
use tracing::{info, instrument};

#[tokio::main]
async fn main() -> ExitCode {
	// Load environment variables from .env file if it exists
	let _ = dotenvy::dotenv();

	init_logging();

	let cli = Cli::parse();

	let (operation, result) = match cli.command {
		Commands::Run { network } => ("run", handle_run(&cli.config, network.as_deref()).await),
		Commands::Networks => ("networks", handle_networks(&cli.config).await),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(error) => {
			operation_error(operation, &error);
			ExitCode::FAILURE
		},
	}
}

async fn load_config(path: &Path) -> Result<Config> {
	Config::from_file(path)
		.await
		.with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Handle run command
#[instrument]
async fn handle_run(config_path: &Path, network: Option<&str>) -> Result<()> {
	let config = load_config(config_path).await?;
	operation_start(
		"run",
		&format!(
			"contract={} network={}",
			config.deployment.contract,
			network.unwrap_or(&config.default_network)
		),
	);

	let ops = DeployOps::new(config);
	let deployment = ops.run(network).await?;

	info!(
		network = %deployment.network,
		chain_id = deployment.chain_id,
		tx_hash = %deployment.transaction_hash,
		"Deployment complete"
	);
	Display::result(&deployment.to_string());

	Ok(())
}

/// Handle networks command
#[instrument]
async fn handle_networks(config_path: &Path) -> Result<()> {
	let config = load_config(config_path).await?;

	Display::header("Configured Networks");
	for network in list_networks(&config) {
		let title = if network.is_default {
			format!("{} (default)", network.name)
		} else {
			network.name.clone()
		};
		Display::section(&title);
		Display::kv("Chain ID", &network.chain_id.to_string());
		Display::kv("RPC URL", &network.url);
		Display::kv("Signer", &network.signer.to_string());
	}

	Ok(())
}
