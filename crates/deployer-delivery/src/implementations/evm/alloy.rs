//! Alloy-based delivery for EVM networks.
//!
//! Builds an HTTP provider for a single network profile with nonce, gas and
//! chain-id fillers and a wallet wrapping the deployer's signer.

use crate::{DeliveryError, DeliveryInterface};
use alloy_network::EthereumWallet;
use alloy_provider::{
	fillers::{ChainIdFiller, GasFiller, NonceFiller, SimpleNonceManager},
	DynProvider, PendingTransactionConfig, PendingTransactionError, Provider, ProviderBuilder,
};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types::TransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use deployer_types::{DeploymentReceipt, DeploymentTransaction, NetworkProfile, TransactionHash};
use std::time::Duration;

/// Alloy-based EVM delivery implementation.
///
/// Submits transactions to the network described by one profile. Requests
/// are sent once; there is no retry layer on the transport.
pub struct AlloyDelivery {
	provider: DynProvider,
	chain_id: u64,
}

impl AlloyDelivery {
	/// Creates a delivery for `profile`, signing with `signer`.
	///
	/// No network traffic happens here; an unreachable endpoint surfaces on
	/// the first submission.
	pub fn new(profile: &NetworkProfile, signer: PrivateKeySigner) -> Result<Self, DeliveryError> {
		let url = profile.url.parse().map_err(|e| {
			DeliveryError::Network(format!("Invalid RPC URL for network {}: {}", profile.name, e))
		})?;

		let wallet = EthereumWallet::from(signer.with_chain_id(Some(profile.chain_id)));
		let client = RpcClient::builder().http(url);

		let provider = ProviderBuilder::new()
			.disable_recommended_fillers()
			.filler(NonceFiller::new(SimpleNonceManager::default()))
			.filler(GasFiller)
			.filler(ChainIdFiller::new(Some(profile.chain_id)))
			.wallet(wallet)
			.connect_client(client);

		Ok(Self {
			provider: provider.erased(),
			chain_id: profile.chain_id,
		})
	}
}

#[async_trait]
impl DeliveryInterface for AlloyDelivery {
	fn chain_id(&self) -> u64 {
		self.chain_id
	}

	async fn submit(&self, tx: DeploymentTransaction) -> Result<TransactionHash, DeliveryError> {
		let request: TransactionRequest = tx.into();

		tracing::debug!(
			chain_id = self.chain_id,
			data_len = request.input.input().map(|d| d.len()).unwrap_or(0),
			gas_limit = ?request.gas,
			gas_price = ?request.gas_price,
			"Sending contract creation transaction"
		);

		// The provider's wallet handles signing
		let pending_tx = self.provider.send_transaction(request).await.map_err(|e| {
			tracing::error!(chain_id = self.chain_id, "Transaction submission failed: {}", e);
			DeliveryError::Network(format!("Failed to send transaction: {}", e))
		})?;

		let tx_hash = TransactionHash(*pending_tx.tx_hash());
		tracing::info!(tx_hash = %tx_hash, chain_id = self.chain_id, "Transaction submitted");

		Ok(tx_hash)
	}

	async fn wait_for_confirmation(
		&self,
		hash: TransactionHash,
		confirmations: u64,
		timeout: Option<Duration>,
	) -> Result<DeploymentReceipt, DeliveryError> {
		match timeout {
			Some(timeout) => tracing::info!(
				"Waiting for {} confirmations (timeout: {}s)",
				confirmations,
				timeout.as_secs()
			),
			None => tracing::info!("Waiting for {} confirmations", confirmations),
		}

		let config = PendingTransactionConfig::new(hash.0)
			.with_required_confirmations(confirmations)
			.with_timeout(timeout);

		let pending_tx = self
			.provider
			.watch_pending_transaction(config)
			.await
			.map_err(|e| match e {
				PendingTransactionError::TxWatcher(_) => {
					DeliveryError::Network(format!("Transaction watch failed: {}", e))
				},
				PendingTransactionError::FailedToRegister => {
					DeliveryError::Network("Failed to register transaction watcher".to_string())
				},
				PendingTransactionError::TransportError(_) => {
					DeliveryError::Network(format!("Transport error: {}", e))
				},
				PendingTransactionError::Recv(_) => {
					DeliveryError::Network(format!("Failed to receive response: {}", e))
				},
			})?;

		let confirmed_hash = pending_tx
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to confirm transaction: {}", e)))?;

		let receipt = self
			.provider
			.get_transaction_receipt(confirmed_hash)
			.await
			.map_err(|e| {
				DeliveryError::Network(format!(
					"Failed to get receipt on chain {}: {}",
					self.chain_id, e
				))
			})?
			.ok_or_else(|| {
				DeliveryError::TransactionFailed(format!(
					"Transaction {} not found on chain {}",
					hash, self.chain_id
				))
			})?;

		Ok(DeploymentReceipt {
			hash: TransactionHash(receipt.transaction_hash),
			block_number: receipt.block_number.unwrap_or(0),
			success: receipt.status(),
			contract_address: receipt.contract_address,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::Bytes;

	const TEST_PRIVATE_KEY: &str =
		"0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

	fn signer() -> PrivateKeySigner {
		TEST_PRIVATE_KEY.parse().unwrap()
	}

	#[test]
	fn test_new_rejects_invalid_url() {
		let profile = NetworkProfile::new("broken", "not a url", 31337);
		let result = AlloyDelivery::new(&profile, signer());
		assert!(matches!(result, Err(DeliveryError::Network(msg)) if msg.contains("broken")));
	}

	#[test]
	fn test_new_binds_profile_chain_id() {
		let profile =
			NetworkProfile::new("alfajores", "https://alfajores-forno.celo-testnet.org", 44787);
		let delivery = AlloyDelivery::new(&profile, signer()).unwrap();
		assert_eq!(delivery.chain_id(), 44787);
	}

	#[tokio::test]
	async fn test_submit_to_unreachable_endpoint_fails() {
		let profile = NetworkProfile::new("closed", "http://127.0.0.1:1", 31337);
		let delivery = AlloyDelivery::new(&profile, signer()).unwrap();

		let tx = DeploymentTransaction::new(31337, Bytes::from_static(&[0x60, 0x80]));
		let result = delivery.submit(tx).await;

		assert!(matches!(result, Err(DeliveryError::Network(_))));
	}
}
