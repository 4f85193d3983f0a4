//! Configuration module for the AMM deployer.
//!
//! This module provides the network/compiler configuration: a table of named
//! network profiles, the pinned compiler version and the parameters of the
//! deployment itself. Configuration is loaded from a TOML file, placeholders
//! are resolved against an optional secrets file and the environment, and the
//! result is validated before use.
//!
//! ## Placeholders
//!
//! Any string may contain `${NAME}` or `${NAME:-default}`. A placeholder is
//! resolved from the secrets file first, then from the environment, then from
//! its inline default. A placeholder with no value anywhere is an error.

pub mod builders;
pub mod secrets;

pub use builders::config::ConfigBuilder;
pub use secrets::Secrets;

use deployer_types::{deserialize_networks, NetworkProfile, NetworksConfig, HARDHAT_NETWORK};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "DEPLOY_CONFIG";

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "deploy.toml";

/// Token contract the AMM is deployed against unless configured otherwise.
pub const DEFAULT_TOKEN_ADDRESS: &str = "0x296d5bF623c2db0F54A373669E64D757C9A2e537";

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Network used when none is selected on the command line.
	#[serde(default = "default_network")]
	pub default_network: String,
	/// Compiler version pin.
	pub compiler: CompilerConfig,
	/// Network profiles keyed by name.
	#[serde(default, deserialize_with = "deserialize_networks")]
	pub networks: NetworksConfig,
	/// What to deploy.
	#[serde(default)]
	pub deployment: DeploymentConfig,
	/// Directory relative paths are resolved against.
	#[serde(skip)]
	pub base_dir: PathBuf,
}

/// Compiler settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompilerConfig {
	/// Pinned Solidity compiler version, `MAJOR.MINOR.PATCH`.
	pub solidity: String,
}

/// Parameters of the deployment performed by `run`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeploymentConfig {
	/// Contract name resolved through the artifacts directory.
	#[serde(default = "default_contract")]
	pub contract: String,
	/// Constructor arguments, coerced to the constructor's declared types.
	#[serde(default = "default_constructor_args")]
	pub constructor_args: Vec<String>,
	/// Compiled artifacts directory.
	#[serde(default = "default_artifacts")]
	pub artifacts: PathBuf,
	/// Confirmations to wait for before reporting success.
	#[serde(default = "default_confirmations")]
	pub confirmations: u64,
}

impl Default for DeploymentConfig {
	fn default() -> Self {
		Self {
			contract: default_contract(),
			constructor_args: default_constructor_args(),
			artifacts: default_artifacts(),
			confirmations: default_confirmations(),
		}
	}
}

fn default_network() -> String {
	HARDHAT_NETWORK.to_string()
}

fn default_contract() -> String {
	"AMM".to_string()
}

fn default_constructor_args() -> Vec<String> {
	vec![DEFAULT_TOKEN_ADDRESS.to_string()]
}

fn default_artifacts() -> PathBuf {
	PathBuf::from("artifacts")
}

fn default_confirmations() -> u64 {
	1
}

/// Resolves `${NAME}` and `${NAME:-default}` placeholders.
///
/// Lookup order is the secrets file, then the environment, then the inline
/// default; an empty secret or environment value counts as absent.
/// Placeholders on full-line `#` comments are left as written. Input strings
/// are limited to 1MB.
pub fn resolve_placeholders(input: &str, secrets: &Secrets) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;

	let mut result = String::with_capacity(input.len());
	let mut last = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let line_start = input[..full_match.start()]
			.rfind('\n')
			.map_or(0, |i| i + 1);
		if input[line_start..full_match.start()]
			.trim_start()
			.starts_with('#')
		{
			continue;
		}

		let name = name.as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = if let Some(secret) = secrets.lookup(name) {
			secret.expose_secret().to_string()
		} else {
			match std::env::var(name) {
				Ok(v) if !v.is_empty() => v,
				_ => match default_value {
					Some(default) => default.to_string(),
					None => {
						return Err(ConfigError::Validation(format!(
							"Secret or environment variable '{name}' not found"
						)))
					},
				},
			}
		};

		result.push_str(&input[last..full_match.start()]);
		result.push_str(&value);
		last = full_match.end();
	}

	result.push_str(&input[last..]);
	Ok(result)
}

impl Config {
	/// Loads configuration from a file.
	///
	/// Reads the optional secrets file next to the config (or at
	/// `DEPLOY_SECRETS`), resolves placeholders against it and the process
	/// environment, and validates the result. Relative paths in the config
	/// resolve against the config file's directory.
	pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
		if !tokio::fs::try_exists(path).await? {
			return Err(ConfigError::Validation(format!(
				"Configuration file not found: {}",
				path.display()
			)));
		}

		let base_dir = path
			.parent()
			.filter(|p| !p.as_os_str().is_empty())
			.unwrap_or_else(|| Path::new("."))
			.to_path_buf();

		let secrets = Secrets::load(&Secrets::default_path(&base_dir)).await?;
		let content = tokio::fs::read_to_string(path).await?;

		let mut config = Self::parse(&content, &secrets)?;
		config.base_dir = base_dir;

		tracing::debug!(
			path = %path.display(),
			networks = config.networks.len(),
			"Configuration loaded"
		);
		Ok(config)
	}

	/// Parses, resolves and validates configuration text.
	pub fn parse(content: &str, secrets: &Secrets) -> Result<Self, ConfigError> {
		let resolved = resolve_placeholders(content, secrets)?;
		let mut config: Config = toml::from_str(&resolved)?;
		config.base_dir = PathBuf::from(".");
		config.networks
			.entry(HARDHAT_NETWORK.to_string())
			.or_insert_with(NetworkProfile::local);
		config.validate()?;
		Ok(config)
	}

	/// Returns the profile named `name`.
	pub fn network(&self, name: &str) -> Option<&NetworkProfile> {
		self.networks.get(name)
	}

	/// Returns the profile used when no network is selected.
	pub fn default_profile(&self) -> Option<&NetworkProfile> {
		self.network(&self.default_network)
	}

	/// Names of all configured networks, sorted.
	pub fn network_names(&self) -> Vec<&str> {
		self.networks.keys().map(String::as_str).collect()
	}

	/// Artifacts directory, resolved against the config file's directory.
	pub fn artifacts_dir(&self) -> PathBuf {
		if self.deployment.artifacts.is_absolute() {
			self.deployment.artifacts.clone()
		} else {
			self.base_dir.join(&self.deployment.artifacts)
		}
	}

	/// Validates the configuration.
	///
	/// - The default network must be configured
	/// - Every network needs an http(s) URL and a non-zero chain id
	/// - A configured gas ceiling or confirmation timeout must be non-zero
	/// - The compiler version must be `MAJOR.MINOR.PATCH`
	/// - The deployment needs a contract name and at least one confirmation
	fn validate(&self) -> Result<(), ConfigError> {
		if !self.networks.contains_key(&self.default_network) {
			return Err(ConfigError::Validation(format!(
				"Default network '{}' is not configured (available: {})",
				self.default_network,
				self.network_names().join(", ")
			)));
		}

		for (name, profile) in &self.networks {
			if !(profile.url.starts_with("http://") || profile.url.starts_with("https://")) {
				return Err(ConfigError::Validation(format!(
					"Network '{name}' must use an http(s) RPC URL, got '{}'",
					profile.url
				)));
			}
			if profile.chain_id == 0 {
				return Err(ConfigError::Validation(format!(
					"Network '{name}' has chain_id 0"
				)));
			}
			if profile.gas == Some(0) {
				return Err(ConfigError::Validation(format!(
					"Network '{name}' has a gas limit of 0"
				)));
			}
			if profile.timeout_seconds == Some(0) {
				return Err(ConfigError::Validation(format!(
					"Network '{name}' has a confirmation timeout of 0"
				)));
			}
		}

		let version_re = Regex::new(r"^\d+\.\d+\.\d+$")
			.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;
		if !version_re.is_match(&self.compiler.solidity) {
			return Err(ConfigError::Validation(format!(
				"Compiler version must be MAJOR.MINOR.PATCH, got '{}'",
				self.compiler.solidity
			)));
		}

		if self.deployment.contract.trim().is_empty() {
			return Err(ConfigError::Validation(
				"Deployment contract name cannot be empty".into(),
			));
		}
		if self.deployment.confirmations == 0 {
			return Err(ConfigError::Validation(
				"Deployment confirmations must be at least 1".into(),
			));
		}

		Ok(())
	}
}

/// Parses configuration text using only the environment and inline defaults.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s, &Secrets::empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	const ALFAJORES: &str = r#"
default_network = "alfajores"

[compiler]
solidity = "0.8.17"

[networks.alfajores]
url = "https://alfajores-forno.celo-testnet.org"
chain_id = 44787
gas = 10000000
accounts = ["${DEPLOYER_TEST_KEY:-0x01f1}"]
"#;

	#[test]
	fn test_placeholder_from_environment() {
		std::env::set_var("DEPLOYER_TEST_HOST", "localhost");
		std::env::set_var("DEPLOYER_TEST_PORT", "8545");

		let input = "url = \"http://${DEPLOYER_TEST_HOST}:${DEPLOYER_TEST_PORT}\"";
		let result = resolve_placeholders(input, &Secrets::empty()).unwrap();
		assert_eq!(result, "url = \"http://localhost:8545\"");

		std::env::remove_var("DEPLOYER_TEST_HOST");
		std::env::remove_var("DEPLOYER_TEST_PORT");
	}

	#[test]
	fn test_placeholder_default_value() {
		let input = "value = \"${DEPLOYER_MISSING_VAR:-fallback}\"";
		let result = resolve_placeholders(input, &Secrets::empty()).unwrap();
		assert_eq!(result, "value = \"fallback\"");
	}

	#[test]
	fn test_missing_placeholder_is_error() {
		let input = "value = \"${DEPLOYER_MISSING_VAR}\"";
		let err = resolve_placeholders(input, &Secrets::empty()).unwrap_err();
		assert!(err.to_string().contains("DEPLOYER_MISSING_VAR"));
	}

	#[test]
	fn test_secrets_take_precedence_over_environment() {
		std::env::set_var("DEPLOYER_PRECEDENCE_KEY", "from-env");

		let mut secrets = Secrets::empty();
		secrets.insert("DEPLOYER_PRECEDENCE_KEY", "from-secrets");
		let result = resolve_placeholders("${DEPLOYER_PRECEDENCE_KEY}", &secrets).unwrap();
		assert_eq!(result, "from-secrets");

		// An empty secret does not override
		secrets.insert("DEPLOYER_PRECEDENCE_KEY", "");
		let result = resolve_placeholders("${DEPLOYER_PRECEDENCE_KEY}", &secrets).unwrap();
		assert_eq!(result, "from-env");

		std::env::remove_var("DEPLOYER_PRECEDENCE_KEY");
	}

	#[test]
	fn test_empty_environment_value_uses_default() {
		std::env::set_var("DEPLOYER_EMPTY_ENV_KEY", "");

		let result =
			resolve_placeholders("key = \"${DEPLOYER_EMPTY_ENV_KEY:-fallback}\"", &Secrets::empty())
				.unwrap();
		assert_eq!(result, "key = \"fallback\"");

		let err = resolve_placeholders("${DEPLOYER_EMPTY_ENV_KEY}", &Secrets::empty()).unwrap_err();
		assert!(err.to_string().contains("DEPLOYER_EMPTY_ENV_KEY"));

		std::env::remove_var("DEPLOYER_EMPTY_ENV_KEY");
	}

	#[test]
	fn test_placeholders_in_comment_lines_are_ignored() {
		let input = "# export ${DEPLOYER_UNSET_COMMENT_VAR}\n  # ${DEPLOYER_UNSET_COMMENT_VAR}\nvalue = \"${DEPLOYER_COMMENT_TEST_VAR:-set}\"\n";
		let result = resolve_placeholders(input, &Secrets::empty()).unwrap();
		assert_eq!(
			result,
			"# export ${DEPLOYER_UNSET_COMMENT_VAR}\n  # ${DEPLOYER_UNSET_COMMENT_VAR}\nvalue = \"set\"\n"
		);

		let config = format!("{ALFAJORES}\n# accounts = [\"${{DEPLOYER_UNSET_COMMENT_VAR}}\"]\n");
		assert!(config.parse::<Config>().is_ok());
	}

	#[test]
	fn test_parse_applies_defaults() {
		let config: Config = ALFAJORES.parse().unwrap();

		assert_eq!(config.default_network, "alfajores");
		assert_eq!(config.compiler.solidity, "0.8.17");
		assert_eq!(config.deployment.contract, "AMM");
		assert_eq!(
			config.deployment.constructor_args,
			vec![DEFAULT_TOKEN_ADDRESS.to_string()]
		);
		assert_eq!(config.deployment.confirmations, 1);

		let profile = config.default_profile().unwrap();
		assert_eq!(profile.name, "alfajores");
		assert_eq!(profile.chain_id, 44787);
		assert_eq!(profile.gas, Some(10_000_000));
		assert_eq!(
			profile.signing_key().unwrap().expose_secret(),
			"0x01f1"
		);
	}

	#[test]
	fn test_local_network_always_available() {
		let config: Config = ALFAJORES.parse().unwrap();
		assert_eq!(config.network_names(), vec!["alfajores", "hardhat"]);

		let local = config.network(HARDHAT_NETWORK).unwrap();
		assert!(local.is_local());
	}

	#[test]
	fn test_unknown_default_network_rejected() {
		let config = r#"
default_network = "celo"

[compiler]
solidity = "0.8.17"
"#;
		let err = config.parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("'celo' is not configured"));
	}

	#[test]
	fn test_invalid_network_values_rejected() {
		let zero_chain = r#"
[compiler]
solidity = "0.8.17"

[networks.broken]
url = "http://localhost:8545"
chain_id = 0
"#;
		assert!(zero_chain.parse::<Config>().is_err());

		let bad_url = r#"
[compiler]
solidity = "0.8.17"

[networks.broken]
url = "ws://localhost:8545"
chain_id = 5
"#;
		assert!(bad_url
			.parse::<Config>()
			.unwrap_err()
			.to_string()
			.contains("http(s)"));

		let zero_gas = r#"
[compiler]
solidity = "0.8.17"

[networks.broken]
url = "http://localhost:8545"
chain_id = 5
gas = 0
"#;
		assert!(zero_gas.parse::<Config>().is_err());

		let zero_timeout = r#"
[compiler]
solidity = "0.8.17"

[networks.broken]
url = "http://localhost:8545"
chain_id = 5
timeout_seconds = 0
"#;
		assert!(zero_timeout
			.parse::<Config>()
			.unwrap_err()
			.to_string()
			.contains("confirmation timeout of 0"));

		let bounded = zero_timeout.replace("timeout_seconds = 0", "timeout_seconds = 120");
		let config: Config = bounded.parse().unwrap();
		assert_eq!(config.network("broken").unwrap().timeout_seconds, Some(120));
	}

	#[test]
	fn test_invalid_compiler_version_rejected() {
		let config = "[compiler]\nsolidity = \"^0.8.0\"\n";
		let err = config.parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("MAJOR.MINOR.PATCH"));
	}

	#[test]
	fn test_zero_confirmations_rejected() {
		let config = "[compiler]\nsolidity = \"0.8.17\"\n\n[deployment]\nconfirmations = 0\n";
		assert!(config.parse::<Config>().is_err());
	}

	#[tokio::test]
	async fn test_from_file_reads_adjacent_secrets() {
		let dir = TempDir::new().unwrap();
		let config_path = dir.path().join("deploy.toml");
		std::fs::write(
			&config_path,
			r#"
[compiler]
solidity = "0.8.17"

[networks.alfajores]
url = "https://alfajores-forno.celo-testnet.org"
chain_id = 44787
accounts = ["${DEPLOYER_FILE_TEST_KEY:-}"]
"#,
		)
		.unwrap();
		std::fs::write(
			dir.path().join("secrets.toml"),
			"DEPLOYER_FILE_TEST_KEY = \"0xfeed\"\n",
		)
		.unwrap();

		let config = Config::from_file(&config_path).await.unwrap();
		let profile = config.network("alfajores").unwrap();
		assert_eq!(profile.signing_key().unwrap().expose_secret(), "0xfeed");
		assert_eq!(config.artifacts_dir(), dir.path().join("artifacts"));
	}

	#[tokio::test]
	async fn test_from_file_without_secrets_uses_default() {
		let dir = TempDir::new().unwrap();
		let config_path = dir.path().join("deploy.toml");
		std::fs::write(
			&config_path,
			r#"
[compiler]
solidity = "0.8.17"

[networks.alfajores]
url = "https://alfajores-forno.celo-testnet.org"
chain_id = 44787
accounts = ["${DEPLOYER_ABSENT_TEST_KEY:-}"]
"#,
		)
		.unwrap();

		let config = Config::from_file(&config_path).await.unwrap();
		assert!(!config.network("alfajores").unwrap().has_signer());
	}

	#[test]
	fn test_shipped_config_parses() {
		let config: Config = include_str!("../../../deploy.toml").parse().unwrap();
		assert_eq!(config.default_network, "hardhat");
		assert_eq!(config.network("alfajores").unwrap().gas, Some(10_000_000));
		assert_eq!(config.deployment.constructor_args, vec![DEFAULT_TOKEN_ADDRESS]);
	}

	#[tokio::test]
	async fn test_from_file_missing() {
		let dir = TempDir::new().unwrap();
		let result = Config::from_file(&dir.path().join("nope.toml")).await;
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}
}
