//! Shell-like splitting of a command line into fields.
//!
//! Fields are separated by runs of spaces or tabs. `"..."` quotes a piece
//! with backslash escapes, `'...'` quotes a piece literally. Quoted and
//! unquoted pieces that touch join into one field, so `a"b c"d` is `ab cd`.
//! A quote with no closing partner is kept as a literal character.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
	#[error("invalid escape sequence {0:?}")]
	InvalidEscape(String),
}

/// Split `line` into fields.
pub fn parse_fields(line: &[u8]) -> Result<Vec<Vec<u8>>, FieldError> {
	let mut fields = Vec::new();
	// `None` until the current field has seen any piece, so `""` yields an
	// empty field while plain whitespace yields nothing.
	let mut field: Option<Vec<u8>> = None;
	let mut i = 0;

	while i < line.len() {
		let b = line[i];
		match b {
			b' ' | b'\t' => {
				if let Some(f) = field.take() {
					fields.push(f);
				}
				i += 1;
			}
			b'"' => match find_closing_double_quote(&line[i + 1..]) {
				Some(len) => {
					let body = &line[i + 1..i + 1 + len];
					field.get_or_insert_with(Vec::new).extend(unescape(body)?);
					i += len + 2;
				}
				None => {
					field.get_or_insert_with(Vec::new).push(b);
					i += 1;
				}
			},
			b'\'' => match line[i + 1..].iter().position(|&c| c == b'\'') {
				Some(len) => {
					let body = &line[i + 1..i + 1 + len];
					field.get_or_insert_with(Vec::new).extend_from_slice(body);
					i += len + 2;
				}
				None => {
					field.get_or_insert_with(Vec::new).push(b);
					i += 1;
				}
			},
			_ => {
				field.get_or_insert_with(Vec::new).push(b);
				i += 1;
			}
		}
	}

	if let Some(f) = field {
		fields.push(f);
	}
	Ok(fields)
}

/// Offset of the closing `"`, skipping backslash-escaped characters.
fn find_closing_double_quote(rest: &[u8]) -> Option<usize> {
	let mut i = 0;
	while i < rest.len() {
		match rest[i] {
			b'\\' => i += 2,
			b'"' => return Some(i),
			_ => i += 1,
		}
	}
	None
}

fn unescape(body: &[u8]) -> Result<Vec<u8>, FieldError> {
	let mut out = Vec::with_capacity(body.len());
	let mut i = 0;

	while i < body.len() {
		if body[i] != b'\\' {
			out.push(body[i]);
			i += 1;
			continue;
		}

		let Some(&kind) = body.get(i + 1) else {
			return Err(invalid(&body[i..]));
		};
		i += 2;
		match kind {
			b'a' => out.push(0x07),
			b'b' => out.push(0x08),
			b'f' => out.push(0x0c),
			b'n' => out.push(b'\n'),
			b'r' => out.push(b'\r'),
			b't' => out.push(b'\t'),
			b'v' => out.push(0x0b),
			b'\\' | b'"' | b'\'' => out.push(kind),
			b'x' => {
				let digits = body.get(i..i + 2).ok_or_else(|| invalid(&body[i - 2..]))?;
				let value = parse_radix(digits, 16).ok_or_else(|| invalid(&body[i - 2..i + 2]))?;
				out.push(value as u8);
				i += 2;
			}
			b'0'..=b'7' => {
				let digits = body.get(i - 1..i + 2).ok_or_else(|| invalid(&body[i - 2..]))?;
				let value = parse_radix(digits, 8)
					.filter(|v| *v <= 0xff)
					.ok_or_else(|| invalid(&body[i - 2..i + 2]))?;
				out.push(value as u8);
				i += 2;
			}
			b'u' | b'U' => {
				let width = if kind == b'u' { 4 } else { 8 };
				let digits = body
					.get(i..i + width)
					.ok_or_else(|| invalid(&body[i - 2..]))?;
				let c = parse_radix(digits, 16)
					.and_then(char::from_u32)
					.ok_or_else(|| invalid(&body[i - 2..i + width]))?;
				let mut utf8 = [0u8; 4];
				out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
				i += width;
			}
			_ => return Err(invalid(&body[i - 2..i])),
		}
	}
	Ok(out)
}

fn parse_radix(digits: &[u8], radix: u32) -> Option<u32> {
	let s = std::str::from_utf8(digits).ok()?;
	if !s.chars().all(|c| c.is_digit(radix)) {
		return None;
	}
	u32::from_str_radix(s, radix).ok()
}

fn invalid(seq: &[u8]) -> FieldError {
	FieldError::InvalidEscape(String::from_utf8_lossy(seq).into_owned())
}
