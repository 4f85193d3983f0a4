//! Local private key wallet.
//!
//! Wraps Alloy's `PrivateKeySigner`. This is the only account implementation:
//! keys come straight from the network profile.

use crate::{AccountError, AccountInterface};
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use deployer_types::{without_0x_prefix, NetworkProfile};

/// First well-known development account of local nodes.
///
/// Used only for local networks with no configured accounts. Never holds real
/// funds.
pub const DEV_PRIVATE_KEY: &str =
	"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Local wallet implementation using Alloy's signer.
#[derive(Debug)]
pub struct LocalWallet {
	/// The underlying Alloy signer that handles cryptographic operations.
	signer: PrivateKeySigner,
}

impl LocalWallet {
	/// Creates a new LocalWallet from a hex-encoded private key.
	///
	/// The private key should be provided as a hex string (with or without 0x prefix).
	pub fn new(private_key_hex: &str) -> Result<Self, AccountError> {
		validate_private_key(private_key_hex).map_err(AccountError::InvalidKey)?;

		let signer = private_key_hex
			.parse::<PrivateKeySigner>()
			.map_err(|e| AccountError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signer })
	}
}

/// Checks that `key` is 32 bytes of hex, with or without 0x prefix.
fn validate_private_key(key: &str) -> Result<(), String> {
	let key_without_prefix = without_0x_prefix(key.trim());

	if key_without_prefix.len() != 64 {
		return Err("Private key must be 64 hex characters (32 bytes)".to_string());
	}

	if hex::decode(key_without_prefix).is_err() {
		return Err("Private key must be valid hexadecimal".to_string());
	}

	Ok(())
}

#[async_trait]
impl AccountInterface for LocalWallet {
	async fn address(&self) -> Result<Address, AccountError> {
		Ok(self.signer.address())
	}

	fn signer(&self) -> PrivateKeySigner {
		self.signer.clone()
	}
}

/// Creates the account that signs for `profile`.
///
/// Uses the profile's first non-empty account. A local development network
/// without accounts falls back to [`DEV_PRIVATE_KEY`]; any other network
/// without accounts is an error, so no transaction is attempted unsigned.
///
/// # Errors
///
/// Returns an error if:
/// - no key is configured for a non-local network
/// - the configured key is not a valid 32-byte hex private key
pub fn create_account(profile: &NetworkProfile) -> Result<Box<dyn AccountInterface>, AccountError> {
	let wallet = match profile.signing_key() {
		Some(key) => key.with_exposed(LocalWallet::new)?,
		None if profile.is_local() => {
			tracing::warn!(
				network = %profile.name,
				"No accounts configured, using the development account"
			);
			LocalWallet::new(DEV_PRIVATE_KEY)?
		},
		None => return Err(AccountError::MissingKey(profile.name.clone())),
	};

	Ok(Box::new(wallet))
}
