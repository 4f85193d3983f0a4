//! Network profile listing
//!
//! Summarizes the configured profiles for the `networks` command. Keys are
//! never included, only where the signer would come from.

use deployer_config::Config;
use deployer_types::NetworkProfile;
use std::fmt;

/// Where a profile's signing key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerSource {
	/// A key is configured for the profile.
	Configured,
	/// Local network without a key; the development account signs.
	Development,
	/// No key; deployments to this profile fail.
	Missing,
}

impl fmt::Display for SignerSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SignerSource::Configured => write!(f, "configured"),
			SignerSource::Development => write!(f, "development account"),
			SignerSource::Missing => write!(f, "missing"),
		}
	}
}

/// One row of the `networks` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSummary {
	pub name: String,
	pub chain_id: u64,
	pub url: String,
	pub signer: SignerSource,
	pub is_default: bool,
}

impl NetworkSummary {
	fn from_profile(profile: &NetworkProfile, default_network: &str) -> Self {
		let signer = if profile.has_signer() {
			SignerSource::Configured
		} else if profile.is_local() {
			SignerSource::Development
		} else {
			SignerSource::Missing
		};

		Self {
			name: profile.name.clone(),
			chain_id: profile.chain_id,
			url: profile.url.clone(),
			signer,
			is_default: profile.name == default_network,
		}
	}
}

/// Summaries of all configured networks, sorted by name.
pub fn list_networks(config: &Config) -> Vec<NetworkSummary> {
	config
		.networks
		.values()
		.map(|profile| NetworkSummary::from_profile(profile, &config.default_network))
		.collect()
}
