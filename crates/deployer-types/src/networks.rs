//! Network profile types for contract deployment.
//!
//! A network profile is the named bundle of connection parameters for one
//! target chain: RPC endpoint, chain identifier, gas ceiling and the signing
//! keys used to submit transactions there.

use crate::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Name of the local development network selected when no other is given.
pub const HARDHAT_NETWORK: &str = "hardhat";

/// RPC URL of a local development node.
pub const DEFAULT_LOCAL_URL: &str = "http://127.0.0.1:8545";

/// Chain IDs used by local development nodes.
pub const LOCAL_CHAIN_IDS: [u64; 2] = [31337, 1337];

/// Configuration for a single target network.
///
/// # Fields
///
/// * `name` - Profile name, filled from the table key when deserialized
/// * `url` - HTTP(S) JSON-RPC endpoint
/// * `chain_id` - Chain identifier used for replay protection
/// * `gas` - Fixed gas limit for submitted transactions; `None` means estimate
/// * `gas_price` - Fixed legacy gas price in wei; `None` means provider default
/// * `accounts` - Private keys; the first one signs
/// * `timeout_seconds` - Optional upper bound on waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkProfile {
	#[serde(default, skip_serializing)]
	pub name: String,
	pub url: String,
	pub chain_id: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_price: Option<u64>,
	#[serde(default)]
	pub accounts: Vec<SecretString>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timeout_seconds: Option<u64>,
}

impl NetworkProfile {
	/// Creates a profile with no gas overrides and no accounts.
	pub fn new(name: impl Into<String>, url: impl Into<String>, chain_id: u64) -> Self {
		Self {
			name: name.into(),
			url: url.into(),
			chain_id,
			gas: None,
			gas_price: None,
			accounts: Vec::new(),
			timeout_seconds: None,
		}
	}

	/// The local development profile.
	pub fn local() -> Self {
		Self::new(HARDHAT_NETWORK, DEFAULT_LOCAL_URL, LOCAL_CHAIN_IDS[0])
	}

	/// Whether this profile points at a local development chain.
	pub fn is_local(&self) -> bool {
		LOCAL_CHAIN_IDS.contains(&self.chain_id)
	}

	/// Key used to sign deployments: the first non-empty configured account.
	pub fn signing_key(&self) -> Option<&SecretString> {
		self.accounts.iter().find(|key| !key.is_empty())
	}

	/// Whether a signing key is configured.
	pub fn has_signer(&self) -> bool {
		self.signing_key().is_some()
	}
}

/// Network profiles keyed by name.
pub type NetworksConfig = BTreeMap<String, NetworkProfile>;

/// Deserializes network profiles and copies each table key into the profile's
/// `name` field.
pub fn deserialize_networks<'de, D>(deserializer: D) -> Result<NetworksConfig, D::Error>
where
	D: Deserializer<'de>,
{
	let raw: HashMap<String, NetworkProfile> = HashMap::deserialize(deserializer)?;

	Ok(raw
		.into_iter()
		.map(|(name, mut profile)| {
			profile.name = name.clone();
			(name, profile)
		})
		.collect())
}
