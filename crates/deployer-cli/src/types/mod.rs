//! Shared types for the deployer CLI.

pub mod error;

pub use error::{Error, Result};
