//! End-to-end checks of the `amm-deploy` binary's exit status and output streams.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const AMM_ARTIFACT: &str = r#"{
	"contractName": "AMM",
	"abi": [
		{
			"type": "constructor",
			"inputs": [{ "internalType": "address", "name": "_token", "type": "address" }],
			"stateMutability": "nonpayable"
		}
	],
	"bytecode": "0x6080604052"
}"#;

fn amm_deploy(dir: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_amm-deploy"))
		.args(args)
		.current_dir(dir)
		.env_remove("DEPLOY_CONFIG")
		.env_remove("DEPLOY_SECRETS")
		.env_remove("RUST_LOG")
		.env("NO_COLOR", "1")
		.output()
		.unwrap()
}

fn write_offline_config(dir: &Path) {
	std::fs::write(
		dir.join("deploy.toml"),
		r#"
default_network = "offline"

[compiler]
solidity = "0.8.17"

[networks.offline]
url = "http://127.0.0.1:1"
chain_id = 31337
timeout_seconds = 5
"#,
	)
	.unwrap();

	let contract_dir = dir.join("artifacts/contracts/AMM.sol");
	std::fs::create_dir_all(&contract_dir).unwrap();
	std::fs::write(contract_dir.join("AMM.json"), AMM_ARTIFACT).unwrap();
}

#[test]
fn test_missing_config_exits_with_failure() {
	let dir = TempDir::new().unwrap();
	let missing = dir.path().join("missing.toml");

	let output = amm_deploy(dir.path(), &["run", "--config", missing.to_str().unwrap()]);

	assert_eq!(output.status.code(), Some(1));
	assert!(output.stdout.is_empty());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("Failed to load configuration"));
}

#[test]
fn test_unreachable_endpoint_exits_with_failure() {
	let dir = TempDir::new().unwrap();
	write_offline_config(dir.path());

	let output = amm_deploy(dir.path(), &["run"]);

	assert_eq!(output.status.code(), Some(1));
	assert!(!String::from_utf8_lossy(&output.stdout).contains("deployed to"));
}

#[test]
fn test_unknown_network_exits_with_failure() {
	let dir = TempDir::new().unwrap();
	write_offline_config(dir.path());

	let output = amm_deploy(dir.path(), &["run", "--network", "mainnet"]);

	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("mainnet"));
}

#[test]
fn test_networks_listing_exits_successfully() {
	let dir = TempDir::new().unwrap();
	write_offline_config(dir.path());

	let output = amm_deploy(dir.path(), &["networks"]);

	assert!(output.status.success());
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("offline"));
	assert!(stdout.contains("hardhat"));
}
