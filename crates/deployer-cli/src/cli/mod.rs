//! Command-line interface definitions and parsing
//!
//! Defines the `amm-deploy` command tree using clap: `run` deploys the
//! configured contract, `networks` lists the configured network profiles.

pub mod output;

use clap::{Parser, Subcommand};
use deployer_config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;

/// Main CLI application structure
#[derive(Parser, Debug)]
#[command(name = "amm-deploy")]
#[command(about = "Deploy the AMM contract to a configured EVM network")]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,

	/// Config file path
	#[arg(global = true, long, env = CONFIG_PATH_ENV, default_value = DEFAULT_CONFIG_FILE)]
	pub config: PathBuf,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Deploy the configured contract once
	Run {
		/// Network profile to deploy to (defaults to `default_network`)
		#[arg(long)]
		network: Option<String>,
	},

	/// List configured network profiles
	Networks,
}
