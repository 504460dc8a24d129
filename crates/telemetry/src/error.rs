use thiserror::Error;

/// Errors raised while setting up logging.
#[derive(Error, Debug)]
pub enum TelemetryError {
	#[error("Invalid log level '{0}', expected one of: trace, debug, info, warn, error")]
	InvalidLogLevel(String),

	#[error("Failed to initialize logger: {0}")]
	InitFailed(String),
}
