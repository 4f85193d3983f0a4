//! AMM contract deployer
//!
//! Library behind the `amm-deploy` binary: command definitions, artifact
//! resolution and the deployment operation itself.

pub mod cli;
pub mod core;
pub mod operations;
pub mod types;

pub use crate::core::{ContractArtifact, ContractFactory};
pub use operations::{list_networks, DeployOps, NetworkSummary, SignerSource};
pub use types::{Error, Result};
