//! Deployment transaction types.
//!
//! This module defines the contract-creation transaction handed to a delivery
//! implementation, the receipt it returns once the transaction is confirmed,
//! and the result reported to the user.

use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Blockchain transaction hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionHash(pub B256);

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<B256> for TransactionHash {
	fn from(hash: B256) -> Self {
		Self(hash)
	}
}

/// A contract-creation transaction.
///
/// There is no recipient: `data` is the creation bytecode followed by the
/// ABI-encoded constructor arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTransaction {
	/// Chain ID for replay protection.
	pub chain_id: u64,
	/// Creation bytecode with constructor arguments appended.
	pub data: Bytes,
	/// Value sent to the constructor.
	pub value: U256,
	/// Fixed gas limit; estimated by the provider when `None`.
	pub gas_limit: Option<u64>,
	/// Fixed legacy gas price in wei; filled by the provider when `None`.
	pub gas_price: Option<u128>,
}

impl DeploymentTransaction {
	/// Creates a zero-value creation transaction with provider-filled gas.
	pub fn new(chain_id: u64, data: Bytes) -> Self {
		Self {
			chain_id,
			data,
			value: U256::ZERO,
			gas_limit: None,
			gas_price: None,
		}
	}

	/// Sets a fixed gas limit.
	pub fn with_gas_limit(mut self, gas_limit: Option<u64>) -> Self {
		self.gas_limit = gas_limit;
		self
	}

	/// Sets a fixed gas price in wei.
	pub fn with_gas_price(mut self, gas_price: Option<u128>) -> Self {
		self.gas_price = gas_price;
		self
	}
}

impl From<DeploymentTransaction> for TransactionRequest {
	fn from(tx: DeploymentTransaction) -> Self {
		TransactionRequest {
			chain_id: Some(tx.chain_id),
			to: Some(TxKind::Create),
			value: Some(tx.value),
			gas: tx.gas_limit,
			gas_price: tx.gas_price,
			input: TransactionInput {
				input: Some(tx.data),
				data: None,
			},
			..Default::default()
		}
	}
}

/// Receipt of a mined deployment transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentReceipt {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block number where the transaction was included.
	pub block_number: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
	/// Address of the created contract, if any.
	pub contract_address: Option<Address>,
}

/// Outcome of one successful deployment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentResult {
	/// Contract name as resolved by the factory.
	pub contract: String,
	/// Network profile the contract was deployed to.
	pub network: String,
	pub chain_id: u64,
	/// Address of the deployed contract.
	pub address: Address,
	pub transaction_hash: TransactionHash,
	pub block_number: u64,
}

impl fmt::Display for DeploymentResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} contract deployed to {}", self.contract, self.address)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn test_transaction_request_is_contract_creation() {
		let tx = DeploymentTransaction::new(44787, Bytes::from(vec![0x60, 0x80]))
			.with_gas_limit(Some(10_000_000))
			.with_gas_price(None);

		let request: TransactionRequest = tx.into();
		assert_eq!(request.to, Some(TxKind::Create));
		assert_eq!(request.chain_id, Some(44787));
		assert_eq!(request.gas, Some(10_000_000));
		assert_eq!(request.gas_price, None);
		assert_eq!(request.value, Some(U256::ZERO));
		assert_eq!(
			request.input.input,
			Some(Bytes::from(vec![0x60, 0x80]))
		);
	}

	#[test]
	fn test_result_display_uses_checksum_address() {
		let result = DeploymentResult {
			contract: "AMM".to_string(),
			network: "alfajores".to_string(),
			chain_id: 44787,
			address: address!("296d5bf623c2db0f54a373669e64d757c9a2e537"),
			transaction_hash: TransactionHash(B256::ZERO),
			block_number: 7,
		};

		assert_eq!(
			result.to_string(),
			"AMM contract deployed to 0x296d5bF623c2db0F54A373669E64D757C9A2e537"
		);
	}
}
