//! Command-line arguments and the top-level run loop.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::codec::Rendering;
use crate::codec::decode_stream;
use crate::codec::encode_stream;
use crate::error::CliError;

/// A redis protocol codec.
///
/// Encodes lines of shell-like tokens into RESP arrays of bulk strings, or
/// decodes a RESP stream into readable text.
#[derive(Parser, Debug)]
#[command(name = "resp", author, version, about, long_about = None)]
pub struct Cli {
	/// Decode redis protocol. Default is to encode.
	#[arg(short, long)]
	pub decode: bool,

	/// Decode into a raw format. Default is human-readable.
	#[arg(short, long, requires = "decode")]
	pub raw: bool,

	/// Log level (trace, debug, info, warn, error). Logs go to stderr.
	#[arg(long, env = "RESP_LOG_LEVEL", default_value = "warn")]
	pub log_level: String,

	/// Read from this file instead of stdin.
	pub file: Option<PathBuf>,
}

impl Cli {
	pub fn rendering(&self) -> Rendering {
		if self.raw {
			Rendering::Raw
		} else {
			Rendering::Human
		}
	}
}

/// Install logging at `args.log_level`.
pub fn setup(args: &Cli) -> Result<(), CliError> {
	telemetry::init(&args.log_level)?;
	Ok(())
}

/// Run the tool against stdout, reading from `args.file` or stdin.
pub fn run(args: &Cli) -> Result<(), CliError> {
	let input: Box<dyn io::Read> = match &args.file {
		Some(path) => Box::new(File::open(path).map_err(|source| CliError::Open {
			path: path.display().to_string(),
			source,
		})?),
		None => Box::new(io::stdin().lock()),
	};
	let stdout = io::stdout().lock();

	if args.decode {
		let count = decode_stream(input, stdout, args.rendering())?;
		info!(count, "Decoded values");
	} else {
		let count = encode_stream(BufReader::new(input), stdout)?;
		info!(count, "Encoded commands");
	}
	Ok(())
}
