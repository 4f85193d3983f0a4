//! Configuration builder for creating test and development configurations.
//!
//! This module provides utilities for constructing Config instances with
//! sensible defaults, particularly useful for testing scenarios.

use crate::{CompilerConfig, Config, DeploymentConfig};
use deployer_types::{NetworkProfile, NetworksConfig, SecretString, HARDHAT_NETWORK};
use std::path::PathBuf;

/// Builder for creating `Config` instances with a fluent API.
///
/// Starts from the local development network only, a `0.8.17` compiler pin
/// and the default deployment parameters.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
	default_network: String,
	solidity: String,
	networks: NetworksConfig,
	deployment: DeploymentConfig,
	base_dir: PathBuf,
}

impl Default for ConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigBuilder {
	/// Creates a new `ConfigBuilder` with default values suitable for testing.
	pub fn new() -> Self {
		let mut networks = NetworksConfig::new();
		networks.insert(HARDHAT_NETWORK.to_string(), NetworkProfile::local());

		Self {
			default_network: HARDHAT_NETWORK.to_string(),
			solidity: "0.8.17".to_string(),
			networks,
			deployment: DeploymentConfig::default(),
			base_dir: PathBuf::from("."),
		}
	}

	/// Sets the default network name.
	pub fn default_network(mut self, name: impl Into<String>) -> Self {
		self.default_network = name.into();
		self
	}

	/// Sets the pinned compiler version.
	pub fn solidity(mut self, version: impl Into<String>) -> Self {
		self.solidity = version.into();
		self
	}

	/// Adds or replaces a network profile under its own name.
	pub fn network(mut self, profile: NetworkProfile) -> Self {
		self.networks.insert(profile.name.clone(), profile);
		self
	}

	/// Adds a remote network with a single signing key.
	pub fn remote_network(
		self,
		name: &str,
		url: &str,
		chain_id: u64,
		private_key: Option<&str>,
	) -> Self {
		let mut profile = NetworkProfile::new(name, url, chain_id);
		profile.accounts = private_key.map(SecretString::from).into_iter().collect();
		self.network(profile)
	}

	/// Sets the contract to deploy.
	pub fn contract(mut self, name: impl Into<String>) -> Self {
		self.deployment.contract = name.into();
		self
	}

	/// Sets the constructor arguments.
	pub fn constructor_args(mut self, args: Vec<String>) -> Self {
		self.deployment.constructor_args = args;
		self
	}

	/// Sets the artifacts directory.
	pub fn artifacts(mut self, path: impl Into<PathBuf>) -> Self {
		self.deployment.artifacts = path.into();
		self
	}

	/// Sets the number of confirmations to wait for.
	pub fn confirmations(mut self, confirmations: u64) -> Self {
		self.deployment.confirmations = confirmations;
		self
	}

	/// Sets the directory relative paths resolve against.
	pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
		self.base_dir = path.into();
		self
	}

	/// Builds the `Config` with the configured values.
	pub fn build(self) -> Config {
		Config {
			default_network: self.default_network,
			compiler: CompilerConfig {
				solidity: self.solidity,
			},
			networks: self.networks,
			deployment: self.deployment,
			base_dir: self.base_dir,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_defaults() {
		let config = ConfigBuilder::new().build();
		assert_eq!(config.default_network, HARDHAT_NETWORK);
		assert_eq!(config.compiler.solidity, "0.8.17");
		assert!(config.default_profile().unwrap().is_local());
		assert_eq!(config.artifacts_dir(), PathBuf::from("./artifacts"));
	}

	#[test]
	fn test_builder_remote_network() {
		let config = ConfigBuilder::new()
			.remote_network("alfajores", "https://alfajores-forno.celo-testnet.org", 44787, None)
			.default_network("alfajores")
			.build();

		let profile = config.default_profile().unwrap();
		assert_eq!(profile.chain_id, 44787);
		assert!(!profile.has_signer());
	}
}
