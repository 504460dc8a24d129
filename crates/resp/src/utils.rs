//! Utility functions and constants for RESP protocol.

use memchr::memmem;

use crate::error::DecodeError;

/// CRLF line ending
pub const CRLF: &[u8] = b"\r\n";

/// Type markers
pub const SIMPLE_STRING: u8 = b'+';
pub const ERROR: u8 = b'-';
pub const INTEGER: u8 = b':';
pub const BULK_STRING: u8 = b'$';
pub const ARRAY: u8 = b'*';

/// Find the position of CRLF in a byte slice
#[inline]
pub fn find_crlf(buf: &[u8]) -> Option<usize> {
	memmem::find(buf, CRLF)
}

/// Null sentinel of a bulk string or array length header
pub const NULL_LENGTH: &[u8] = b"-1";

/// Parse `<optional '-'> <decimal digits>`. A leading `+` is rejected.
#[inline]
fn parse_decimal(buf: &[u8]) -> Option<i64> {
	let digits = buf.strip_prefix(b"-").unwrap_or(buf);
	if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
		return None;
	}
	std::str::from_utf8(buf).ok()?.parse::<i64>().ok()
}

/// Parse a signed decimal integer from a byte slice
#[inline]
pub fn parse_integer(buf: &[u8]) -> Result<i64, DecodeError> {
	parse_decimal(buf).ok_or_else(|| DecodeError::InvalidInteger(lossy(buf)))
}

/// Parse a bulk string or array length header.
///
/// Returns `None` for the null sentinel `-1`. Any other sign is malformed.
#[inline]
pub fn parse_length(buf: &[u8]) -> Result<Option<usize>, DecodeError> {
	if buf == NULL_LENGTH {
		return Ok(None);
	}
	if buf.first() == Some(&b'-') {
		return Err(DecodeError::MalformedLength(lossy(buf)));
	}
	parse_decimal(buf)
		.and_then(|n| usize::try_from(n).ok())
		.map(Some)
		.ok_or_else(|| DecodeError::MalformedLength(lossy(buf)))
}

fn lossy(buf: &[u8]) -> String {
	String::from_utf8_lossy(buf).into_owned()
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn test_find_crlf() {
		assert_eq!(find_crlf(b"hello\r\n"), Some(5));
		assert_eq!(find_crlf(b"hello"), None);
		assert_eq!(find_crlf(b"\r\n"), Some(0));
		assert_eq!(find_crlf(b"a\rb\nc\r\n"), Some(5));
	}

	#[test]
	fn test_parse_integer() {
		assert_eq!(parse_integer(b"123").unwrap(), 123);
		assert_eq!(parse_integer(b"-456").unwrap(), -456);
		assert_eq!(parse_integer(b"-9223372036854775808").unwrap(), i64::MIN);
		assert!(matches!(
			parse_integer(b"abc"),
			Err(DecodeError::InvalidInteger(s)) if s == "abc"
		));
		assert!(parse_integer(b"9223372036854775808").is_err());
		assert!(parse_integer(b"").is_err());
		assert!(parse_integer(b"-").is_err());
		assert_eq!(parse_integer(b"-0").unwrap(), 0);
	}

	#[rstest]
	#[case(b"+5")]
	#[case(b" 5")]
	#[case(b"5 ")]
	#[case(b"--5")]
	fn test_parse_integer_rejects_non_decimal(#[case] input: &[u8]) {
		assert!(matches!(
			parse_integer(input),
			Err(DecodeError::InvalidInteger(_))
		));
	}

	#[rstest]
	#[case(b"0", Some(0))]
	#[case(b"12", Some(12))]
	#[case(b"-1", None)]
	fn test_parse_length_valid(#[case] input: &[u8], #[case] expected: Option<usize>) {
		assert_eq!(parse_length(input).unwrap(), expected);
	}

	#[rstest]
	#[case(b"-2")]
	#[case(b"abc")]
	#[case(b"")]
	#[case(b"1.5")]
	#[case(b"+3")]
	#[case(b"-0")]
	#[case(b"-")]
	fn test_parse_length_invalid(#[case] input: &[u8]) {
		assert!(matches!(
			parse_length(input),
			Err(DecodeError::MalformedLength(_))
		));
	}
}
