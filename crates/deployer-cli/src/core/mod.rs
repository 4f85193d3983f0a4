//! Core deployment building blocks: artifact resolution and logging helpers.

pub mod artifacts;
pub mod logging;

pub use artifacts::{ContractArtifact, ContractFactory};
