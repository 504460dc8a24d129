//! Blocking RESP decoder over any `std::io::Read`.

use std::io::ErrorKind;
use std::io::Read;

use bytes::Buf;
use bytes::Bytes;
use bytes::BytesMut;

use crate::error::DecodeError;
use crate::types::RespValue;
use crate::utils::*;

/// Bytes requested from the reader per refill.
const READ_CHUNK: usize = 8 * 1024;

/// Upper bound on array capacity reserved from an untrusted length header.
const MAX_PREALLOC: usize = 1024;

/// Reads RESP values one at a time from a byte stream.
///
/// The decoder keeps a read buffer, so it may pull more bytes from the
/// reader than the value being decoded needs. Those bytes are kept for the
/// next call; [`Decoder::buffer`] exposes them.
///
/// When a call fails, every byte examined so far stays consumed: a malformed
/// integer or length line is consumed through its CRLF, an unknown prefix
/// only consumes the prefix byte. A failure inside an array leaves the
/// cursor inside that array, and the stream should be treated as corrupt.
#[derive(Debug)]
pub struct Decoder<R> {
	reader: R,
	buf: BytesMut,
	failed: bool,
}

/// An array still waiting for `remaining` elements.
#[derive(Debug)]
struct Frame {
	remaining: usize,
	elements: Vec<RespValue>,
}

impl<R: Read> Decoder<R> {
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			buf: BytesMut::with_capacity(READ_CHUNK),
			failed: false,
		}
	}

	/// Read one complete value.
	///
	/// Returns `Ok(None)` when the stream ends cleanly before a prefix byte.
	/// End of stream anywhere after the prefix is
	/// [`DecodeError::UnexpectedEOF`].
	pub fn read_value(&mut self) -> Result<Option<RespValue>, DecodeError> {
		match self.read_byte()? {
			Some(prefix) => self.read_typed(prefix).map(Some),
			None => Ok(None),
		}
	}

	/// Bytes read from the underlying reader but not yet decoded.
	pub fn buffer(&self) -> &[u8] {
		&self.buf
	}

	/// Consume the decoder, returning the reader. Buffered bytes are lost.
	pub fn into_inner(self) -> R {
		self.reader
	}

	/// Decode the value introduced by `prefix`.
	///
	/// Arrays are assembled on an explicit frame stack instead of by
	/// recursion, so nesting depth costs heap rather than call stack.
	fn read_typed(&mut self, mut prefix: u8) -> Result<RespValue, DecodeError> {
		let mut frames: Vec<Frame> = Vec::new();

		loop {
			let mut value = match prefix {
				ARRAY => match self.read_array_header()? {
					Some(0) => RespValue::Array(Some(Vec::new())),
					Some(length) => {
						frames.push(Frame {
							remaining: length,
							elements: Vec::with_capacity(length.min(MAX_PREALLOC)),
						});
						prefix = self.read_element_prefix()?;
						continue;
					}
					None => RespValue::Array(None),
				},
				other => self.read_scalar(other)?,
			};

			// Fold the finished value into its parents, closing every array
			// it completes.
			loop {
				let Some(frame) = frames.last_mut() else {
					return Ok(value);
				};
				frame.elements.push(value);
				frame.remaining -= 1;
				if frame.remaining > 0 {
					break;
				}
				let elements = std::mem::take(&mut frame.elements);
				frames.pop();
				value = RespValue::Array(Some(elements));
			}

			prefix = self.read_element_prefix()?;
		}
	}

	fn read_element_prefix(&mut self) -> Result<u8, DecodeError> {
		self.read_byte()?.ok_or(DecodeError::UnexpectedEOF)
	}

	fn read_scalar(&mut self, prefix: u8) -> Result<RespValue, DecodeError> {
		match prefix {
			SIMPLE_STRING => Ok(RespValue::SimpleString(self.read_line()?)),
			ERROR => Ok(RespValue::Error(self.read_line()?)),
			INTEGER => {
				let line = self.read_line()?;
				Ok(RespValue::Integer(parse_integer(&line)?))
			}
			BULK_STRING => self.read_bulk_string(),
			other => Err(DecodeError::UnknownPrefix(other)),
		}
	}

	fn read_bulk_string(&mut self) -> Result<RespValue, DecodeError> {
		// $6\r\nfoobar\r\n
		let header = self.read_line()?;
		let Some(length) = parse_length(&header)? else {
			return Ok(RespValue::BulkString(None));
		};

		let data = self.read_exact(length)?;
		for expected in CRLF {
			let b = self.read_byte()?.ok_or(DecodeError::UnexpectedEOF)?;
			if b != *expected {
				return Err(DecodeError::InvalidTerminator(b));
			}
		}

		Ok(RespValue::BulkString(Some(data)))
	}

	/// Element count of an array, `None` for the null array.
	fn read_array_header(&mut self) -> Result<Option<usize>, DecodeError> {
		let header = self.read_line()?;
		parse_length(&header)
	}

	fn read_byte(&mut self) -> Result<Option<u8>, DecodeError> {
		if self.buf.is_empty() && self.fill()? == 0 {
			return Ok(None);
		}
		Ok(Some(self.buf.get_u8()))
	}

	/// Read up to the next CRLF, consuming it. The line excludes the CRLF.
	fn read_line(&mut self) -> Result<Bytes, DecodeError> {
		let mut searched = 0;
		loop {
			if let Some(pos) = find_crlf(&self.buf[searched..]) {
				let line = self.buf.split_to(searched + pos).freeze();
				self.buf.advance(CRLF.len());
				return Ok(line);
			}
			// A CR at the end of the buffer may pair with an LF still unread.
			searched = self.buf.len().saturating_sub(1);
			if self.fill()? == 0 {
				return Err(DecodeError::UnexpectedEOF);
			}
		}
	}

	fn read_exact(&mut self, length: usize) -> Result<Bytes, DecodeError> {
		while self.buf.len() < length {
			if self.fill()? == 0 {
				return Err(DecodeError::UnexpectedEOF);
			}
		}
		Ok(self.buf.split_to(length).freeze())
	}

	/// Append the next chunk from the reader. Returns 0 at end of stream.
	fn fill(&mut self) -> Result<usize, DecodeError> {
		// Read straight into the buffer's tail, then drop what was not filled.
		let start = self.buf.len();
		self.buf.resize(start + READ_CHUNK, 0);
		loop {
			match self.reader.read(&mut self.buf[start..]) {
				Ok(n) => {
					self.buf.truncate(start + n);
					return Ok(n);
				}
				Err(e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) => {
					self.buf.truncate(start);
					return Err(e.into());
				}
			}
		}
	}
}

/// Yields values until the stream ends cleanly. After the first error the
/// iterator is exhausted.
impl<R: Read> Iterator for Decoder<R> {
	type Item = Result<RespValue, DecodeError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}
		match self.read_value() {
			Ok(Some(value)) => Some(Ok(value)),
			Ok(None) => None,
			Err(e) => {
				self.failed = true;
				Some(Err(e))
			}
		}
	}
}

/// Convenience function for one-off decoding of a single value.
///
/// An empty input is [`DecodeError::UnexpectedEOF`]. Bytes after the first
/// value are ignored. If streaming is needed, use [`Decoder`] directly.
pub fn decode(input: &[u8]) -> Result<RespValue, DecodeError> {
	Decoder::new(input)
		.read_value()?
		.ok_or(DecodeError::UnexpectedEOF)
}
