//! Optional secrets file.
//!
//! The secrets file is a flat TOML table of string values. It is read if it
//! exists and ignored otherwise; a key whose value is empty counts as absent,
//! so the caller's default (or the environment) applies.

use crate::ConfigError;
use deployer_types::SecretString;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable overriding the secrets file location.
pub const SECRETS_PATH_ENV: &str = "DEPLOY_SECRETS";

/// Default secrets file name, looked up next to the config file.
pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";

/// Secret values loaded from the optional secrets file.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
	values: HashMap<String, SecretString>,
}

impl Secrets {
	/// An empty secrets store.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Resolves the secrets file location for a config living in `base_dir`.
	pub fn default_path(base_dir: &Path) -> PathBuf {
		match std::env::var(SECRETS_PATH_ENV) {
			Ok(path) if !path.is_empty() => PathBuf::from(path),
			_ => base_dir.join(DEFAULT_SECRETS_FILE),
		}
	}

	/// Loads secrets from `path` if the file exists.
	pub async fn load(path: &Path) -> Result<Self, ConfigError> {
		if !tokio::fs::try_exists(path).await? {
			tracing::debug!(path = %path.display(), "No secrets file, using defaults");
			return Ok(Self::empty());
		}

		let content = tokio::fs::read_to_string(path).await?;
		let secrets = Self::parse(&content)?;
		tracing::debug!(
			path = %path.display(),
			count = secrets.values.len(),
			"Loaded secrets file"
		);
		Ok(secrets)
	}

	/// Parses a flat TOML table of string values.
	pub fn parse(content: &str) -> Result<Self, ConfigError> {
		let raw: HashMap<String, String> = toml::from_str(content)
			.map_err(|e| ConfigError::Parse(format!("Invalid secrets file: {}", e.message())))?;

		Ok(Self {
			values: raw
				.into_iter()
				.map(|(key, value)| (key, SecretString::from(value)))
				.collect(),
		})
	}

	/// Adds or replaces a secret.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SecretString>) {
		self.values.insert(key.into(), value.into());
	}

	/// Returns the secret for `key` when it is present and non-empty.
	pub fn lookup(&self, key: &str) -> Option<&SecretString> {
		self.values.get(key).filter(|value| !value.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn test_empty_values_count_as_absent() {
		let secrets = Secrets::parse("PRIVATE_KEY = \"abc\"\nEMPTY = \"\"").unwrap();

		assert_eq!(secrets.lookup("PRIVATE_KEY").unwrap().expose_secret(), "abc");
		assert!(secrets.lookup("EMPTY").is_none());
		assert!(secrets.lookup("MISSING").is_none());
	}

	#[test]
	fn test_parse_rejects_non_string_values() {
		assert!(Secrets::parse("PRIVATE_KEY = 12").is_err());
	}

	#[tokio::test]
	async fn test_missing_file_is_empty() {
		let dir = TempDir::new().unwrap();
		let secrets = Secrets::load(&dir.path().join("secrets.toml"))
			.await
			.unwrap();
		assert!(secrets.lookup("PRIVATE_KEY").is_none());
	}

	#[tokio::test]
	async fn test_load_existing_file() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("secrets.toml");
		std::fs::write(&path, "PRIVATE_KEY = \"0x01\"\n").unwrap();

		let secrets = Secrets::load(&path).await.unwrap();
		assert_eq!(secrets.lookup("PRIVATE_KEY").unwrap().expose_secret(), "0x01");
	}
}
