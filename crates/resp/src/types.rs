//! RESP data types and value representation.

use std::fmt;

use bytes::Bytes;

use crate::utils::ARRAY;
use crate::utils::BULK_STRING;
use crate::utils::ERROR;
use crate::utils::INTEGER;
use crate::utils::SIMPLE_STRING;

/// Represents a RESP protocol value.
///
/// The set of variants is closed: the decoder and the encoder both match on
/// it exhaustively. Bulk strings and arrays carry an `Option` so that the
/// protocol null (`None`) stays distinct from the present-but-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RespValue {
	/// Simple string: `+OK\r\n`
	SimpleString(Bytes),

	/// Error: `-ERR message\r\n`
	Error(Bytes),

	/// Integer: `:1000\r\n`
	Integer(i64),

	/// Bulk string: `$6\r\nfoobar\r\n`, or `$-1\r\n` when `None`
	BulkString(Option<Bytes>),

	/// Array: `*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n`, or `*-1\r\n` when `None`
	Array(Option<Vec<RespValue>>),
}

impl RespValue {
	/// The wire prefix byte of this value's type.
	pub fn prefix(&self) -> u8 {
		match self {
			RespValue::SimpleString(_) => SIMPLE_STRING,
			RespValue::Error(_) => ERROR,
			RespValue::Integer(_) => INTEGER,
			RespValue::BulkString(_) => BULK_STRING,
			RespValue::Array(_) => ARRAY,
		}
	}

	/// Check if the value is an error
	pub fn is_error(&self) -> bool {
		matches!(self, RespValue::Error(_))
	}

	/// Check if the value is a null bulk string or a null array
	pub fn is_null(&self) -> bool {
		matches!(self, RespValue::BulkString(None) | RespValue::Array(None))
	}

	/// Try to convert to a string slice.
	///
	/// Returns `None` for null bulk strings and for payloads that are not
	/// valid UTF-8.
	pub fn as_str(&self) -> Option<&str> {
		self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
	}

	/// Try to convert to bytes
	pub fn as_bytes(&self) -> Option<&Bytes> {
		match self {
			RespValue::SimpleString(b) | RespValue::Error(b) => Some(b),
			RespValue::BulkString(b) => b.as_ref(),
			_ => None,
		}
	}

	/// Try to convert to integer
	pub fn as_integer(&self) -> Option<i64> {
		match self {
			RespValue::Integer(i) => Some(*i),
			_ => None,
		}
	}

	/// Try to convert to array. Null arrays yield `None`.
	pub fn as_array(&self) -> Option<&[RespValue]> {
		match self {
			RespValue::Array(a) => a.as_deref(),
			_ => None,
		}
	}

	/// Convert to String with lossy UTF-8 conversion
	pub fn to_string_lossy(&self) -> Option<String> {
		self.as_bytes()
			.map(|b| String::from_utf8_lossy(b).into_owned())
	}

	/// Try to consume and convert to Vec<RespValue>
	pub fn into_array(self) -> Option<Vec<RespValue>> {
		match self {
			RespValue::Array(a) => a,
			_ => None,
		}
	}

	// Convenience constructors

	/// Create a simple string value.
	///
	/// The payload must not contain CR or LF; this is not checked.
	pub fn simple_string(s: impl Into<Bytes>) -> Self {
		RespValue::SimpleString(s.into())
	}

	/// Create an error value.
	///
	/// The payload must not contain CR or LF; this is not checked.
	pub fn error(e: impl Into<Bytes>) -> Self {
		RespValue::Error(e.into())
	}

	/// Create an integer value
	pub fn integer(i: i64) -> Self {
		RespValue::Integer(i)
	}

	/// Create a bulk string value
	pub fn bulk_string(s: impl Into<Bytes>) -> Self {
		RespValue::BulkString(Some(s.into()))
	}

	/// Create a null bulk string (`$-1\r\n`)
	pub fn null_bulk_string() -> Self {
		RespValue::BulkString(None)
	}

	/// Create an array value from an iterator
	pub fn array(items: impl IntoIterator<Item = RespValue>) -> Self {
		RespValue::Array(Some(items.into_iter().collect()))
	}

	/// Create a null array (`*-1\r\n`)
	pub fn null_array() -> Self {
		RespValue::Array(None)
	}

	/// Render the value's literal content, one array element per line.
	///
	/// ```rust
	/// use resp::RespValue;
	///
	/// let v = RespValue::array(vec![RespValue::integer(1), "two".into()]);
	/// assert_eq!(v.raw().to_string(), "1\ntwo");
	/// ```
	pub fn raw(&self) -> Raw<'_> {
		Raw(self)
	}

	/// Render the value the way an interactive client displays replies.
	///
	/// ```rust
	/// use resp::RespValue;
	///
	/// let v = RespValue::array(vec![RespValue::null_bulk_string(), RespValue::error("ERR x")]);
	/// assert_eq!(v.human().to_string(), "1) (nil)\n2) (error) ERR x");
	/// ```
	pub fn human(&self) -> Human<'_> {
		Human(self)
	}
}

/// Raw rendering of a [`RespValue`], see [`RespValue::raw`].
#[derive(Debug, Clone, Copy)]
pub struct Raw<'a>(&'a RespValue);

impl fmt::Display for Raw<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			RespValue::SimpleString(s) | RespValue::Error(s) | RespValue::BulkString(Some(s)) => {
				f.write_str(&String::from_utf8_lossy(s))
			}
			RespValue::Integer(i) => write!(f, "{}", i),
			RespValue::BulkString(None) | RespValue::Array(None) => Ok(()),
			RespValue::Array(Some(items)) => {
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str("\n")?;
					}
					write!(f, "{}", item.raw())?;
				}
				Ok(())
			}
		}
	}
}

/// Human-readable rendering of a [`RespValue`], see [`RespValue::human`].
#[derive(Debug, Clone, Copy)]
pub struct Human<'a>(&'a RespValue);

impl fmt::Display for Human<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			RespValue::SimpleString(s) | RespValue::BulkString(Some(s)) => {
				f.write_str(&String::from_utf8_lossy(s))
			}
			RespValue::Error(e) => write!(f, "(error) {}", String::from_utf8_lossy(e)),
			RespValue::Integer(i) => write!(f, "{}", i),
			RespValue::BulkString(None) | RespValue::Array(None) => f.write_str("(nil)"),
			RespValue::Array(Some(items)) if items.is_empty() => f.write_str("(empty array)"),
			RespValue::Array(Some(items)) => {
				for (i, item) in items.iter().enumerate() {
					let label = format!("{}) ", i + 1);
					if i > 0 {
						f.write_str("\n")?;
					}
					f.write_str(&label)?;

					// Nested lines line up under the first character after the label.
					let rendered = item.human().to_string();
					let mut lines = rendered.split('\n');
					if let Some(first) = lines.next() {
						f.write_str(first)?;
					}
					for line in lines {
						write!(f, "\n{:width$}{}", "", line, width = label.len())?;
					}
				}
				Ok(())
			}
		}
	}
}

// Convenient From implementations
impl From<&str> for RespValue {
	fn from(s: &str) -> Self {
		RespValue::BulkString(Some(Bytes::copy_from_slice(s.as_bytes())))
	}
}

impl From<String> for RespValue {
	fn from(s: String) -> Self {
		RespValue::BulkString(Some(Bytes::from(s)))
	}
}

impl From<&[u8]> for RespValue {
	fn from(b: &[u8]) -> Self {
		RespValue::BulkString(Some(Bytes::copy_from_slice(b)))
	}
}

impl From<Vec<u8>> for RespValue {
	fn from(v: Vec<u8>) -> Self {
		RespValue::BulkString(Some(Bytes::from(v)))
	}
}

impl From<Bytes> for RespValue {
	fn from(b: Bytes) -> Self {
		RespValue::BulkString(Some(b))
	}
}

impl From<i64> for RespValue {
	fn from(i: i64) -> Self {
		RespValue::Integer(i)
	}
}

impl From<i32> for RespValue {
	fn from(i: i32) -> Self {
		RespValue::Integer(i as i64)
	}
}

impl<T: Into<RespValue>> From<Vec<T>> for RespValue {
	fn from(v: Vec<T>) -> Self {
		RespValue::Array(Some(v.into_iter().map(|x| x.into()).collect()))
	}
}

impl<T: Into<RespValue>> From<Option<T>> for RespValue {
	fn from(o: Option<T>) -> Self {
		match o {
			Some(v) => v.into(),
			None => RespValue::BulkString(None),
		}
	}
}
