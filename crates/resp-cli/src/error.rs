use thiserror::Error;

use crate::fields::FieldError;

/// Errors that abort the command-line tool.
#[derive(Error, Debug)]
pub enum CliError {
	#[error("Failed to open '{path}': {source}")]
	Open {
		source: std::io::Error,
		path: String,
	},

	#[error(transparent)]
	Decode(#[from] resp::DecodeError),

	#[error("line {line}: {source}")]
	Field { source: FieldError, line: usize },

	#[error(transparent)]
	Telemetry(#[from] telemetry::TelemetryError),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
