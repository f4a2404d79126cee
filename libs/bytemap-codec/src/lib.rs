//! bytemap-codec - Bit-level frame codec for byte-map
//!
//! Converts integers among decimal, binary and hexadecimal forms under
//! configurable byte/bit ordering and IEC 61131-3 type constraints, and
//! packs/unpacks named bit-fields (signals) onto a fixed 8-byte frame.
//!
//! All operations are pure, synchronous functions over caller-owned
//! data; nothing here retains state between calls.
//!
//! # Example
//!
//! ```rust
//! use bytemap_codec::{
//!     decode_field, encode_frame, to_binary_string, BitField, BitOrder, ByteOrder,
//! };
//!
//! // Numeric view: -1 as a 2-byte little-endian pattern
//! let binary = to_binary_string(-1, 2, ByteOrder::LsbFirst, BitOrder::MsbFirst);
//! assert_eq!(binary, "11111111 11111111");
//!
//! // Signal view: a 4-bit field packed into the frame's top nibble
//! let mut level = BitField::new("level");
//! level.bit_length = 4;
//! level.value = "15".to_string();
//!
//! let frame = encode_frame(&[level.clone()]);
//! assert_eq!(frame.byte(0).unwrap(), 0xF0);
//! assert_eq!(decode_field(&frame, &level).unwrap(), 15);
//! ```

pub mod error;
pub mod field;
pub mod frame;
pub mod numeric;
pub mod order;
pub mod signal;
pub mod types;

// Re-exports for convenience
pub use error::{CodecError, Result};
pub use field::{parse_field_value, validate_field, value_bounds, BitField};
pub use frame::{parse_hex_byte, Frame, FRAME_BITS, FRAME_BYTES};
pub use numeric::{to_binary_string, to_hex_string};
pub use order::{BitOrder, ByteOrder};
pub use signal::{decode_field, decode_frame, encode_frame};
pub use types::{lookup, validate_value, IntegerType, ValueCheck, TYPES};
