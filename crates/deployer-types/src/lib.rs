//! Common types module for the AMM deployer.
//!
//! This module defines the data types shared by the configuration, account,
//! delivery and CLI crates. It provides a centralized location for network
//! profiles, secret handling and deployment transaction types.

/// Deployment transaction, receipt and result types.
pub mod delivery;
/// Network profile types.
pub mod networks;
/// Secure string type for handling sensitive data.
pub mod secret_string;
/// Utility functions for common type conversions.
pub mod utils;

pub use delivery::{DeploymentReceipt, DeploymentResult, DeploymentTransaction, TransactionHash};
pub use networks::{
	deserialize_networks, NetworkProfile, NetworksConfig, DEFAULT_LOCAL_URL, HARDHAT_NETWORK,
	LOCAL_CHAIN_IDS,
};
pub use secret_string::SecretString;
pub use utils::without_0x_prefix;
