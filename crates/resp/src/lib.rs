//! # RESP - Redis Serialization Protocol Library
//!
//! A blocking RESP2 decoder and encoder over `std::io` streams.
//!
//! Every RESP2 type is one variant of [`RespValue`]. Bulk strings and arrays
//! hold an `Option`, so the protocol null (`$-1`, `*-1`) is never confused
//! with an empty string or an empty array.
//!
//! ## Example
//!
//! ```rust
//! use resp::{Decoder, Encoder, RespValue};
//!
//! let cmd = RespValue::array(vec![
//!     RespValue::bulk_string("SET"),
//!     RespValue::bulk_string("key"),
//!     RespValue::bulk_string("value"),
//! ]);
//!
//! let mut encoder = Encoder::new(Vec::new());
//! encoder.write_value(&cmd).unwrap();
//! let wire = encoder.into_inner();
//!
//! let mut decoder = Decoder::new(&wire[..]);
//! assert_eq!(decoder.read_value().unwrap(), Some(cmd));
//! assert_eq!(decoder.read_value().unwrap(), None);
//! ```

mod decoder;
mod encoder;
mod error;
mod types;
mod utils;

pub use decoder::Decoder;
pub use decoder::decode;
pub use encoder::Encoder;
pub use encoder::RespEncoder;
pub use encoder::encode;
pub use error::DecodeError;
pub use types::Human;
pub use types::Raw;
pub use types::RespValue;
