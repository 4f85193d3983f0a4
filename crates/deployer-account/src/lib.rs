//! Account management module for the AMM deployer.
//!
//! This module provides the signing credentials used to authorize deployment
//! transactions. It defines the account interface and builds the account for
//! a network profile, refusing to produce one when no signing key is
//! available.

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

pub use implementations::local::{create_account, LocalWallet, DEV_PRIVATE_KEY};

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// No signing key is configured for the selected network.
	#[error("No signing key configured for network '{0}'")]
	MissingKey(String),
}

/// Trait defining the interface for account implementations.
///
/// Provides the address of the account and a signer that the delivery layer
/// wraps into an alloy wallet.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	/// Retrieves the address associated with this account.
	async fn address(&self) -> Result<Address, AccountError>;

	/// Returns the signer for use with Alloy's EthereumWallet.
	fn signer(&self) -> PrivateKeySigner;
}
