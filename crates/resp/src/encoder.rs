//! RESP encoding into buffers and blocking writers.

use std::io;
use std::io::Write;

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;

use crate::types::RespValue;
use crate::utils::*;

/// Trait for encoding RESP values.
///
/// Encoding a well-formed value cannot fail. Simple string and error
/// payloads are written as-is; a payload containing CR or LF produces output
/// that no conforming decoder will read back.
pub trait RespEncoder {
	fn encode_to(&self, buf: &mut BytesMut);

	fn encode(&self) -> Bytes {
		let mut buf = BytesMut::new();
		self.encode_to(&mut buf);
		buf.freeze()
	}
}

impl RespEncoder for RespValue {
	fn encode_to(&self, buf: &mut BytesMut) {
		match self {
			RespValue::SimpleString(s) => encode_line(buf, SIMPLE_STRING, s),
			RespValue::Error(e) => encode_line(buf, ERROR, e),
			RespValue::Integer(i) => encode_integer(buf, *i),
			RespValue::BulkString(Some(s)) => encode_bulk_string(buf, s),
			RespValue::BulkString(None) => encode_null(buf, BULK_STRING),
			RespValue::Array(Some(arr)) => encode_array(buf, arr),
			RespValue::Array(None) => encode_null(buf, ARRAY),
		}
	}
}

/// Convenience function for one-off encoding.
pub fn encode(value: &RespValue) -> Bytes {
	value.encode()
}

/// Writes RESP values to a blocking byte sink.
///
/// Each value is encoded into an internal buffer and then written and
/// flushed in full before [`Encoder::write_value`] returns.
#[derive(Debug)]
pub struct Encoder<W> {
	writer: W,
	buf: BytesMut,
}

impl<W: Write> Encoder<W> {
	pub fn new(writer: W) -> Self {
		Self {
			writer,
			buf: BytesMut::new(),
		}
	}

	/// Encode `value` and write it to the sink.
	///
	/// Errors only come from the sink and are returned unchanged.
	pub fn write_value(&mut self, value: &RespValue) -> io::Result<()> {
		self.buf.clear();
		value.encode_to(&mut self.buf);
		self.writer.write_all(&self.buf)?;
		self.writer.flush()
	}

	pub fn into_inner(self) -> W {
		self.writer
	}
}

#[inline]
fn encode_line(buf: &mut BytesMut, marker: u8, s: &[u8]) {
	buf.put_u8(marker);
	buf.put_slice(s);
	buf.put_slice(CRLF);
}

#[inline]
fn encode_integer(buf: &mut BytesMut, i: i64) {
	buf.put_u8(INTEGER);
	buf.put_slice(i.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn encode_length(buf: &mut BytesMut, marker: u8, length: usize) {
	buf.put_u8(marker);
	buf.put_slice(length.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn encode_null(buf: &mut BytesMut, marker: u8) {
	buf.put_u8(marker);
	buf.put_slice(NULL_LENGTH);
	buf.put_slice(CRLF);
}

#[inline]
fn encode_bulk_string(buf: &mut BytesMut, s: &[u8]) {
	buf.reserve(s.len() + 16);
	encode_length(buf, BULK_STRING, s.len());
	buf.put_slice(s);
	buf.put_slice(CRLF);
}

fn encode_array(buf: &mut BytesMut, arr: &[RespValue]) {
	encode_length(buf, ARRAY, arr.len());
	for value in arr {
		value.encode_to(buf);
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn test_encode_simple_string() {
		let val = RespValue::simple_string("a simple string");
		assert_eq!(val.encode(), b"+a simple string\r\n".as_slice());
	}

	#[test]
	fn test_encode_error() {
		let val = RespValue::error("WRONGTYPE bad op");
		assert_eq!(val.encode(), b"-WRONGTYPE bad op\r\n".as_slice());
	}

	#[rstest]
	#[case(12345, b":12345\r\n")]
	#[case(-12345, b":-12345\r\n")]
	#[case(0, b":0\r\n")]
	#[case(i64::MIN, b":-9223372036854775808\r\n")]
	fn test_encode_integer(#[case] input: i64, #[case] expected: &[u8]) {
		assert_eq!(RespValue::Integer(input).encode(), expected);
	}

	#[rstest]
	#[case(RespValue::bulk_string("a bulk string 32 chars in length"), b"$32\r\na bulk string 32 chars in length\r\n")]
	#[case(RespValue::bulk_string(""), b"$0\r\n\r\n")]
	#[case(RespValue::null_bulk_string(), b"$-1\r\n")]
	#[case(RespValue::array(vec![]), b"*0\r\n")]
	#[case(RespValue::null_array(), b"*-1\r\n")]
	fn test_encode_lengths_and_nulls(#[case] value: RespValue, #[case] expected: &[u8]) {
		assert_eq!(value.encode(), expected);
	}

	#[test]
	fn test_encode_array() {
		let val = RespValue::array(vec![
			RespValue::simple_string("OK"),
			RespValue::error("ERR invalid"),
			RespValue::bulk_string("bulk string"),
			RespValue::null_bulk_string(),
			RespValue::integer(12345),
		]);
		assert_eq!(
			val.encode(),
			b"*5\r\n+OK\r\n-ERR invalid\r\n$11\r\nbulk string\r\n$-1\r\n:12345\r\n".as_slice()
		);
	}

	#[test]
	fn test_encode_does_not_validate_simple_string() {
		let val = RespValue::simple_string("a\r\nb");
		assert_eq!(val.encode(), b"+a\r\nb\r\n".as_slice());
	}

	#[test]
	fn test_encoder_writes_in_order() {
		let mut encoder = Encoder::new(Vec::new());
		encoder.write_value(&RespValue::simple_string("OK")).unwrap();
		encoder.write_value(&RespValue::integer(1)).unwrap();
		assert_eq!(encoder.into_inner(), b"+OK\r\n:1\r\n");
	}

	#[test]
	fn test_encoder_surfaces_sink_errors() {
		struct Closed;

		impl Write for Closed {
			fn write(&mut self, _: &[u8]) -> io::Result<usize> {
				Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
			}

			fn flush(&mut self) -> io::Result<()> {
				Ok(())
			}
		}

		let mut encoder = Encoder::new(Closed);
		let err = encoder
			.write_value(&RespValue::simple_string("OK"))
			.unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
	}
}
