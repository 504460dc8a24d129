//! Library half of the `resp` command-line tool.
//!
//! Encode mode reads lines of tokens and writes one RESP array of bulk
//! strings per line. Decode mode reads a RESP stream and prints each value,
//! human-readable or raw.

pub mod cli;
pub mod codec;
pub mod error;
pub mod fields;

pub use cli::Cli;
pub use codec::Rendering;
pub use error::CliError;
