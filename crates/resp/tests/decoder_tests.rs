//! Integration tests for the streaming decoder

use std::io;
use std::io::Read;

use resp::DecodeError;
use resp::Decoder;
use resp::RespEncoder;
use resp::RespValue;

/// Hands out at most one byte per `read` call.
struct Trickle<'a> {
	data: &'a [u8],
}

impl Read for Trickle<'_> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		if self.data.is_empty() || buf.is_empty() {
			return Ok(0);
		}
		buf[0] = self.data[0];
		self.data = &self.data[1..];
		Ok(1)
	}
}

/// Fails with `Interrupted` every other call.
struct Flaky<'a> {
	data: &'a [u8],
	interrupt: bool,
}

impl Read for Flaky<'_> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.interrupt = !self.interrupt;
		if self.interrupt {
			return Err(io::Error::from(io::ErrorKind::Interrupted));
		}
		self.data.read(buf)
	}
}

#[test]
fn test_decode_mixed_array_scenario() {
	let input = b"*3\r\n:1\r\n$-1\r\n+OK\r\n";
	let value = resp::decode(input).unwrap();

	assert_eq!(
		value,
		RespValue::array(vec![
			RespValue::integer(1),
			RespValue::null_bulk_string(),
			RespValue::simple_string("OK"),
		])
	);
	assert_eq!(&value.encode()[..], &input[..]);
}

#[test]
fn test_decode_redis_set_command() {
	let value = resp::decode(b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n").unwrap();

	let args = value.as_array().expect("Expected array");
	assert_eq!(args.len(), 3);
	assert_eq!(args[0].as_str(), Some("SET"));
	assert_eq!(args[1].as_str(), Some("key"));
	assert_eq!(args[2].as_str(), Some("value"));
}

#[test]
fn test_decode_consecutive_values() {
	let mut decoder = Decoder::new(&b"+OK\r\n:1000\r\n*2\r\n$3\r\nSET\r\n$3\r\nkey\r\n"[..]);

	assert_eq!(
		decoder.read_value().unwrap(),
		Some(RespValue::simple_string("OK"))
	);
	assert_eq!(decoder.read_value().unwrap(), Some(RespValue::integer(1000)));
	assert_eq!(
		decoder.read_value().unwrap(),
		Some(RespValue::array(vec!["SET".into(), "key".into()]))
	);
	assert_eq!(decoder.read_value().unwrap(), None);
}

#[test]
fn test_decode_from_byte_at_a_time_reader() {
	let input = b"*4\r\n+OK\r\n$12\r\nfoo bar\r\nbaz\r\n*-1\r\n:-7\r\n-ERR x\r\n";
	let mut decoder = Decoder::new(Trickle { data: input });

	assert_eq!(
		decoder.read_value().unwrap(),
		Some(RespValue::array(vec![
			RespValue::simple_string("OK"),
			RespValue::bulk_string("foo bar\r\nbaz"),
			RespValue::null_array(),
			RespValue::integer(-7),
		]))
	);
	assert_eq!(
		decoder.read_value().unwrap(),
		Some(RespValue::error("ERR x"))
	);
	assert_eq!(decoder.read_value().unwrap(), None);
}

#[test]
fn test_decode_retries_interrupted_reads() {
	let mut decoder = Decoder::new(Flaky {
		data: b"$5\r\nhello\r\n",
		interrupt: false,
	});
	assert_eq!(
		decoder.read_value().unwrap(),
		Some(RespValue::bulk_string("hello"))
	);
}

#[test]
fn test_decode_surfaces_reader_errors() {
	struct Broken;

	impl Read for Broken {
		fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
			Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
		}
	}

	let mut decoder = Decoder::new(Broken);
	match decoder.read_value() {
		Err(DecodeError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
		other => panic!("Expected Io error, got {:?}", other),
	}
}

#[test]
fn test_prefix_only_is_unexpected_eof() {
	for input in [&b"$"[..], b"+", b"-", b":", b"*"] {
		let mut decoder = Decoder::new(input);
		assert!(
			matches!(decoder.read_value(), Err(DecodeError::UnexpectedEOF)),
			"Expected UnexpectedEOF for {:?}",
			input
		);
	}
}

#[test]
fn test_array_element_error_aborts_whole_array() {
	let mut decoder = Decoder::new(&b"*3\r\n:1\r\n:oops\r\n:3\r\n"[..]);
	assert!(matches!(
		decoder.read_value(),
		Err(DecodeError::InvalidInteger(_))
	));
	// The cursor stays inside the broken array.
	assert_eq!(decoder.buffer(), b":3\r\n");
}

#[test]
fn test_error_display_matches_tool_output() {
	let err = resp::decode(b"&nope\r\n").unwrap_err();
	assert_eq!(err.to_string(), "resp: unknown prefix '&'");
}
