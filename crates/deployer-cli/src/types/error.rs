//! Error types and result handling for the deployer CLI
//!
//! Wraps the errors of the configuration, account and delivery crates and
//! adds the failures that belong to the deployment itself: network
//! selection, artifact resolution, constructor encoding and receipt checks.

use deployer_account::AccountError;
use deployer_config::ConfigError;
use deployer_delivery::DeliveryError;
use std::path::PathBuf;

/// Convenience Result type alias using the local Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all deployment operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
	// Configuration errors
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error("Network '{name}' is not configured (available: {available})")]
	UnknownNetwork { name: String, available: String },

	// Signing errors
	#[error(transparent)]
	Account(#[from] AccountError),

	// Artifact errors
	#[error("Artifact for contract {name} not found in {dir}")]
	ArtifactNotFound { name: String, dir: PathBuf },

	#[error("Ambiguous artifact for contract {name}: {candidates}")]
	AmbiguousArtifact { name: String, candidates: String },

	#[error("Invalid artifact {path}: {reason}")]
	InvalidArtifact { path: PathBuf, reason: String },

	#[error("Invalid constructor arguments: {0}")]
	InvalidArguments(String),

	// Delivery errors
	#[error(transparent)]
	Delivery(#[from] DeliveryError),

	#[error("Deployment failed: {0}")]
	DeploymentFailed(String),

	// IO errors
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}
