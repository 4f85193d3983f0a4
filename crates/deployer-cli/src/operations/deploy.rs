//! Contract deployment
//!
//! Runs the single deployment the tool exists for: resolve the configured
//! contract's artifact, encode its constructor arguments, submit one
//! contract-creation transaction and wait for it to be confirmed. Nothing is
//! retried and nothing is persisted between runs, so every successful run
//! creates a new contract.

use crate::{
	core::{logging::operation_warning, ContractArtifact, ContractFactory},
	types::error::{Error, Result},
};
use deployer_account::create_account;
use deployer_config::Config;
use deployer_delivery::{AlloyDelivery, DeliveryInterface};
use deployer_types::{DeploymentResult, DeploymentTransaction, NetworkProfile};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Deployment operations handler
pub struct DeployOps {
	config: Config,
}

impl DeployOps {
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Picks the profile named `name`, or the default network when `None`.
	///
	/// # Errors
	///
	/// Returns `UnknownNetwork`, listing the configured names, when no
	/// profile has that name.
	pub fn select_network(&self, name: Option<&str>) -> Result<&NetworkProfile> {
		let name = name.unwrap_or(&self.config.default_network);
		self.config.network(name).ok_or_else(|| Error::UnknownNetwork {
			name: name.to_string(),
			available: self.config.network_names().join(", "),
		})
	}

	/// Deploys the configured contract to `network`.
	///
	/// The signer is built before anything touches the network, so a profile
	/// without a usable key fails without sending a request.
	#[instrument(skip(self))]
	pub async fn run(&self, network: Option<&str>) -> Result<DeploymentResult> {
		let profile = self.select_network(network)?;
		let account = create_account(profile)?;
		let deployer = account.address().await?;

		info!(
			network = %profile.name,
			chain_id = profile.chain_id,
			deployer = %deployer,
			"Deploying {}",
			self.config.deployment.contract
		);

		let delivery = AlloyDelivery::new(profile, account.signer())?;
		self.deploy_with(profile, &delivery).await
	}

	/// Deploys through an already constructed delivery.
	///
	/// The artifact and constructor arguments are resolved first; the
	/// transaction is only submitted once its data is complete. A reverted
	/// receipt or one without a contract address is a failure.
	#[instrument(skip_all, fields(network = %profile.name, contract = %self.config.deployment.contract))]
	pub async fn deploy_with(
		&self,
		profile: &NetworkProfile,
		delivery: &dyn DeliveryInterface,
	) -> Result<DeploymentResult> {
		let deployment = &self.config.deployment;

		let factory = ContractFactory::new(self.config.artifacts_dir());
		let artifact = factory.load(&deployment.contract)?;
		self.check_compiler(&artifact);

		let data = artifact.deploy_data(&deployment.constructor_args)?;
		let chain_id = delivery.chain_id();
		let tx = DeploymentTransaction::new(chain_id, data)
			.with_gas_limit(profile.gas)
			.with_gas_price(profile.gas_price.map(u128::from));

		let tx_hash = delivery.submit(tx).await?;

		let timeout = profile.timeout_seconds.map(Duration::from_secs);
		let receipt = delivery
			.wait_for_confirmation(tx_hash, deployment.confirmations, timeout)
			.await?;

		if !receipt.success {
			return Err(Error::DeploymentFailed(format!(
				"Transaction {} reverted in block {}",
				tx_hash, receipt.block_number
			)));
		}

		let address = receipt
			.contract_address
			.ok_or_else(|| Error::DeploymentFailed("No contract address in receipt".to_string()))?;

		info!(
			address = %address,
			tx_hash = %tx_hash,
			block = receipt.block_number,
			"Contract deployed successfully"
		);

		Ok(DeploymentResult {
			contract: artifact.name,
			network: profile.name.clone(),
			chain_id,
			address,
			transaction_hash: tx_hash,
			block_number: receipt.block_number,
		})
	}

	/// Warns when the artifact was built by a different compiler than pinned.
	fn check_compiler(&self, artifact: &ContractArtifact) {
		let pinned = &self.config.compiler.solidity;
		match artifact.compiler_matches(pinned) {
			Some(true) => {},
			Some(false) => operation_warning(
				"deploy",
				&format!(
					"{} was compiled with solc {} but the configuration pins {}",
					artifact.name,
					artifact.compiler_version.as_deref().unwrap_or_default(),
					pinned
				),
				&artifact.path.display().to_string(),
			),
			None => debug!(
				path = %artifact.path.display(),
				"Compiler version of artifact unknown, skipping pin check"
			),
		}
	}
}
