//! Stream-level encode and decode loops behind the `resp` binary.

use std::io::BufRead;
use std::io::Read;
use std::io::Write;

use resp::Decoder;
use resp::Encoder;
use resp::RespValue;
use tracing::debug;

use crate::error::CliError;
use crate::fields::parse_fields;

/// How decoded values are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rendering {
	#[default]
	Human,
	Raw,
}

/// Encode each input line as an array of bulk strings.
///
/// Blank lines are skipped. Returns the number of values written.
pub fn encode_stream<R: BufRead, W: Write>(reader: R, writer: W) -> Result<usize, CliError> {
	let mut encoder = Encoder::new(writer);
	let mut written = 0;

	for (index, line) in reader.split(b'\n').enumerate() {
		let mut line = line?;
		if line.last() == Some(&b'\r') {
			line.pop();
		}

		let fields = parse_fields(&line).map_err(|source| CliError::Field {
			source,
			line: index + 1,
		})?;
		if fields.is_empty() {
			continue;
		}

		debug!(line = index + 1, fields = fields.len(), "Encoding command");
		let command = RespValue::array(fields.into_iter().map(RespValue::from));
		encoder.write_value(&command)?;
		written += 1;
	}

	Ok(written)
}

/// Decode values until the stream ends, printing one rendering per value.
///
/// A clean end of stream is success. Returns the number of values printed.
pub fn decode_stream<R: Read, W: Write>(
	reader: R,
	mut writer: W,
	rendering: Rendering,
) -> Result<usize, CliError> {
	let mut decoder = Decoder::new(reader);
	let mut printed = 0;

	while let Some(value) = decoder.read_value()? {
		debug!(prefix = %char::from(value.prefix()), "Decoded value");
		match rendering {
			Rendering::Human => writeln!(writer, "{}", value.human())?,
			Rendering::Raw => writeln!(writer, "{}", value.raw())?,
		}
		printed += 1;
	}

	writer.flush()?;
	Ok(printed)
}
