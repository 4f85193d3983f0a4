//! Operations behind the CLI commands.

pub mod deploy;
pub mod networks;

pub use deploy::DeployOps;
pub use networks::{list_networks, NetworkSummary, SignerSource};
