//! Builders for constructing configuration in code.

pub mod config;
