mod error;
pub mod logger;

// Re-export logger initialization for convenience
pub use error::TelemetryError;
pub use logger::init;
pub use logger::parse_level;
