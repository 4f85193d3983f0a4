//! Compiled contract artifacts
//!
//! Locates the compiler output for a contract by name and turns it into the
//! data of a contract-creation transaction. Two layouts are understood: the
//! hardhat one (`artifacts/contracts/X.sol/X.json`, with the compiler version
//! in the build-info referenced by `X.dbg.json`) and the foundry one
//! (`out/X.sol/X.json`, with the compiler version in its metadata).

use crate::types::error::{Error, Result};
use alloy_dyn_abi::{DynSolValue, JsonAbiExt, Specifier};
use alloy_json_abi::JsonAbi;
use alloy_primitives::Bytes;
use serde_json::Value;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Compiled form of one contract.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
	/// Contract name.
	pub name: String,
	/// File the artifact was read from.
	pub path: PathBuf,
	pub abi: JsonAbi,
	/// Creation bytecode, without constructor arguments.
	pub bytecode: Bytes,
	/// `MAJOR.MINOR.PATCH` of the compiler that produced the artifact, when known.
	pub compiler_version: Option<String>,
}

impl ContractArtifact {
	/// Builds an artifact from its parsed JSON.
	///
	/// Accepts bytecode as a plain hex string or as `{ "object": "0x..." }`.
	/// Empty bytecode and unlinked library placeholders are rejected since
	/// neither can be deployed.
	pub fn from_json(name: &str, path: &Path, json: &Value) -> Result<Self> {
		let invalid = |reason: String| Error::InvalidArtifact {
			path: path.to_path_buf(),
			reason,
		};

		let abi: JsonAbi = match json.get("abi") {
			Some(abi) => serde_json::from_value(abi.clone())
				.map_err(|e| invalid(format!("Invalid ABI: {}", e)))?,
			None => return Err(invalid("No ABI found in artifact".to_string())),
		};

		let bytecode = extract_bytecode(json).map_err(invalid)?;

		let compiler_version = json
			.pointer("/metadata/compiler/version")
			.and_then(Value::as_str)
			.map(normalize_version);

		Ok(Self {
			name: name.to_string(),
			path: path.to_path_buf(),
			abi,
			bytecode,
			compiler_version,
		})
	}

	/// ABI-encodes `args` against the constructor's declared parameters.
	///
	/// Each argument is coerced from its string form to the parameter type,
	/// so an address parameter only accepts a 20-byte hex string.
	pub fn encode_constructor_args(&self, args: &[String]) -> Result<Bytes> {
		let Some(constructor) = &self.abi.constructor else {
			if args.is_empty() {
				return Ok(Bytes::new());
			}
			return Err(Error::InvalidArguments(format!(
				"{} has no constructor but {} argument(s) were given",
				self.name,
				args.len()
			)));
		};

		if constructor.inputs.len() != args.len() {
			return Err(Error::InvalidArguments(format!(
				"{} constructor expects {} argument(s), got {}",
				self.name,
				constructor.inputs.len(),
				args.len()
			)));
		}

		let values = constructor
			.inputs
			.iter()
			.zip(args)
			.map(|(param, arg)| {
				let ty = param.resolve().map_err(|e| {
					Error::InvalidArguments(format!("Unsupported parameter type {}: {}", param.ty, e))
				})?;
				ty.coerce_str(arg).map_err(|e| {
					Error::InvalidArguments(format!(
						"Cannot use '{}' as {} {}: {}",
						arg, param.ty, param.name, e
					))
				})
			})
			.collect::<Result<Vec<DynSolValue>>>()?;

		let encoded = constructor
			.abi_encode_input(&values)
			.map_err(|e| Error::InvalidArguments(e.to_string()))?;

		Ok(Bytes::from(encoded))
	}

	/// Creation bytecode followed by the encoded constructor arguments.
	pub fn deploy_data(&self, args: &[String]) -> Result<Bytes> {
		let encoded = self.encode_constructor_args(args)?;

		let mut data = self.bytecode.to_vec();
		data.extend_from_slice(&encoded);
		Ok(Bytes::from(data))
	}

	/// Compares the artifact's compiler version with `pinned`.
	///
	/// Returns `None` when the version could not be determined.
	pub fn compiler_matches(&self, pinned: &str) -> Option<bool> {
		self.compiler_version.as_deref().map(|version| version == pinned)
	}
}

/// Resolves contract names to artifacts under one directory.
#[derive(Debug, Clone)]
pub struct ContractFactory {
	artifacts_dir: PathBuf,
}

impl ContractFactory {
	pub fn new(artifacts_dir: impl Into<PathBuf>) -> Self {
		Self {
			artifacts_dir: artifacts_dir.into(),
		}
	}

	/// Finds the single `<name>.json` that sits in a `*.sol` directory.
	///
	/// # Errors
	///
	/// Returns `ArtifactNotFound` when there is no match and
	/// `AmbiguousArtifact` when several source files define the name.
	pub fn find_artifact(&self, name: &str) -> Result<PathBuf> {
		let not_found = || Error::ArtifactNotFound {
			name: name.to_string(),
			dir: self.artifacts_dir.clone(),
		};

		if !self.artifacts_dir.is_dir() {
			return Err(not_found());
		}

		let file_name = format!("{}.json", name);
		let mut matches = Vec::new();
		walk_artifacts(&self.artifacts_dir, &mut |path: &Path| {
			if path.file_name() == Some(OsStr::new(&file_name)) {
				matches.push(path.to_path_buf());
			}
		})?;
		matches.sort();

		match matches.len() {
			0 => {
				debug!(
					contract = name,
					available = ?self.list_available_contracts().unwrap_or_default(),
					"No artifact matches contract name"
				);
				Err(not_found())
			},
			1 => Ok(matches.remove(0)),
			_ => Err(Error::AmbiguousArtifact {
				name: name.to_string(),
				candidates: matches
					.iter()
					.map(|p| p.display().to_string())
					.collect::<Vec<_>>()
					.join(", "),
			}),
		}
	}

	/// Loads and validates the artifact for `name`.
	pub fn load(&self, name: &str) -> Result<ContractArtifact> {
		let path = self.find_artifact(name)?;
		let content = std::fs::read_to_string(&path)?;
		let json: Value = serde_json::from_str(&content).map_err(|e| Error::InvalidArtifact {
			path: path.clone(),
			reason: format!("Invalid JSON: {}", e),
		})?;

		let mut artifact = ContractArtifact::from_json(name, &path, &json)?;
		if artifact.compiler_version.is_none() {
			artifact.compiler_version = build_info_version(&path, name);
		}

		debug!(
			contract = name,
			path = %path.display(),
			bytecode_len = artifact.bytecode.len(),
			compiler = ?artifact.compiler_version,
			"Loaded contract artifact"
		);
		Ok(artifact)
	}

	/// Names of all contracts with an artifact, sorted and deduplicated.
	pub fn list_available_contracts(&self) -> Result<Vec<String>> {
		let mut names = Vec::new();
		walk_artifacts(&self.artifacts_dir, &mut |path: &Path| {
			let name = path.file_name().and_then(OsStr::to_str).unwrap_or_default();
			if let Some(contract) = name.strip_suffix(".json") {
				if !contract.ends_with(".dbg") {
					names.push(contract.to_string());
				}
			}
		})?;
		names.sort();
		names.dedup();
		Ok(names)
	}
}

/// Calls `visit` for every file whose parent directory is named `*.sol`.
fn walk_artifacts(dir: &Path, visit: &mut dyn FnMut(&Path)) -> std::io::Result<()> {
	for entry in std::fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();
		if entry.file_type()?.is_dir() {
			walk_artifacts(&path, visit)?;
		} else if in_source_dir(&path) {
			visit(&path);
		}
	}
	Ok(())
}

fn in_source_dir(path: &Path) -> bool {
	path.parent()
		.and_then(Path::file_name)
		.and_then(OsStr::to_str)
		.is_some_and(|dir| dir.ends_with(".sol"))
}

fn extract_bytecode(json: &Value) -> std::result::Result<Bytes, String> {
	let raw = match json.get("bytecode") {
		Some(Value::String(code)) => code.as_str(),
		Some(Value::Object(obj)) => obj
			.get("object")
			.and_then(Value::as_str)
			.ok_or("No bytecode object in artifact")?,
		_ => return Err("No bytecode found in artifact".to_string()),
	};

	let hex_str = raw.strip_prefix("0x").unwrap_or(raw);
	if hex_str.is_empty() {
		return Err("Bytecode is empty, the contract is abstract or an interface".to_string());
	}
	if hex_str.contains("__") {
		return Err("Bytecode contains unlinked library references".to_string());
	}

	hex::decode(hex_str)
		.map(Bytes::from)
		.map_err(|e| format!("Invalid bytecode hex: {}", e))
}

/// Strips build metadata: `0.8.17+commit.8df45f5f` becomes `0.8.17`.
fn normalize_version(version: &str) -> String {
	version.split('+').next().unwrap_or(version).to_string()
}

/// Reads the compiler version hardhat records in the build-info file that
/// `<name>.dbg.json` points to.
fn build_info_version(artifact_path: &Path, name: &str) -> Option<String> {
	let dbg_path = artifact_path.with_file_name(format!("{}.dbg.json", name));
	let dbg: Value = serde_json::from_str(&std::fs::read_to_string(&dbg_path).ok()?).ok()?;
	let build_info = dbg_path.parent()?.join(dbg.get("buildInfo")?.as_str()?);
	let info: Value = serde_json::from_str(&std::fs::read_to_string(build_info).ok()?).ok()?;
	info.get("solcVersion")
		.and_then(Value::as_str)
		.map(normalize_version)
}
