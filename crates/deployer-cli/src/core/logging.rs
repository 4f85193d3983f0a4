//! Logging setup and operation-level log helpers
//!
//! User-facing output goes through [`Display`]; these helpers pair it with a
//! structured tracing event so the console stays readable while `RUST_LOG`
//! still gives the full picture.

use crate::cli::output::Display;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "amm_deploy=info,warn";

/// Initialize structured logging
///
/// Logs go to stderr so stdout carries only the deployment result.
pub fn init_logging() {
	use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

	tracing_subscriber::registry()
		.with(
			fmt::layer()
				.with_writer(std::io::stderr)
				.with_target(true)
				.with_thread_ids(false)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.with(env_filter)
		.init();
}

/// Reports a failed operation to the user and the log.
pub fn operation_error(operation: &str, error: &anyhow::Error) {
	Display::error(&format!("{:#}", error));
	error!(
		operation = operation,
		error = %error,
		"Operation failed"
	);
}

/// Reports a non-fatal problem to the user and the log.
///
/// # Arguments
/// * `operation` - Name of the operation with warning
/// * `message` - Warning message to display
/// * `context` - Additional context for logging
pub fn operation_warning(operation: &str, message: &str, context: &str) {
	Display::warning(message);
	warn!(
		operation = operation,
		message = message,
		context = context,
		"Operation warning"
	);
}

/// Records the start of an operation.
pub fn operation_start(operation: &str, context: &str) {
	info!(
		operation = operation,
		context = context,
		"Operation started"
	);
}
