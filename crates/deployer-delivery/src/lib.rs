//! Transaction delivery module for the AMM deployer.
//!
//! This module handles the submission and monitoring of the contract-creation
//! transaction. It defines the delivery interface the deployment runner talks
//! to and re-exports the alloy-based implementation.

use async_trait::async_trait;
use deployer_types::{DeploymentReceipt, DeploymentTransaction, TransactionHash};
use std::time::Duration;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

pub use implementations::evm::alloy::AlloyDelivery;

/// Errors that can occur during transaction delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when a transaction execution fails.
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
}

/// Trait defining the interface for transaction delivery implementations.
///
/// A delivery is bound to one network and one signer. Submission happens
/// exactly once per call; implementations must not resubmit on failure.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait DeliveryInterface: Send + Sync {
	/// Chain ID of the network this delivery submits to.
	fn chain_id(&self) -> u64;

	/// Signs and submits a transaction, returning its hash once the node has
	/// accepted it.
	async fn submit(&self, tx: DeploymentTransaction) -> Result<TransactionHash, DeliveryError>;

	/// Waits until the transaction has the requested number of confirmations
	/// and returns its receipt.
	///
	/// Waits indefinitely when `timeout` is `None`.
	async fn wait_for_confirmation(
		&self,
		hash: TransactionHash,
		confirmations: u64,
		timeout: Option<Duration>,
	) -> Result<DeploymentReceipt, DeliveryError>;
}
