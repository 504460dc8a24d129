//! Error types for RESP decoding.

use thiserror::Error;

/// Errors that can occur while decoding a RESP value.
///
/// A clean end of stream before any prefix byte is not an error; the decoder
/// reports it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum DecodeError {
	/// Stream ended after a value was started
	#[error("resp: unexpected end of input")]
	UnexpectedEOF,

	/// Prefix byte is not one of `+ - : $ *`
	#[error("resp: unknown prefix {:?}", byte_char(.0))]
	UnknownPrefix(u8),

	/// Bulk string or array length header is not a valid length
	#[error("resp: malformed length {0:?}")]
	MalformedLength(String),

	/// Integer line is not a signed 64-bit decimal
	#[error("resp: invalid integer {0:?}")]
	InvalidInteger(String),

	/// Bulk string body was not followed by CRLF
	#[error("resp: invalid bulk string terminator {:?}", byte_char(.0))]
	InvalidTerminator(u8),

	/// Error reported by the underlying reader
	#[error("resp: {0}")]
	Io(#[from] std::io::Error),
}

fn byte_char(b: &u8) -> char {
	char::from(*b)
}
