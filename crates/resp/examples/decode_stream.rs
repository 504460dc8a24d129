use std::io::Cursor;

use resp::Decoder;
use resp::Encoder;
use resp::RespValue;

fn main() {
	println!("--- RESP Stream Example ---");

	// Write a few replies the way a server would.
	let replies = vec![
		RespValue::simple_string("OK"),
		RespValue::integer(1000),
		RespValue::array(vec!["SET".into(), "key".into(), RespValue::null_bulk_string()]),
		RespValue::error("WRONGTYPE Operation against a key holding the wrong kind of value"),
	];

	let mut encoder = Encoder::new(Vec::new());
	for reply in &replies {
		if let Err(e) = encoder.write_value(reply) {
			eprintln!("[Encoder] Error: {}", e);
			return;
		}
	}
	let wire = encoder.into_inner();
	println!("[Wire] {:?}", String::from_utf8_lossy(&wire));

	// Read them back until the stream ends.
	let mut decoder = Decoder::new(Cursor::new(wire));
	loop {
		match decoder.read_value() {
			Ok(Some(value)) => {
				println!("[Decoder] Complete: {:?}", value);
				println!("{}", value.human());
			}
			Ok(None) => {
				println!("[Decoder] End of stream");
				break;
			}
			Err(e) => {
				eprintln!("[Decoder] Error: {}", e);
				break;
			}
		}
	}
}
