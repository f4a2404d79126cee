//! Bit-field (signal) definitions and advisory validation
//!
//! A field names a bit-addressable region of the 64-bit frame together
//! with its encoding parameters. Fields are reference data owned by the
//! caller and applied to whatever frame is current; validation results
//! are advisory and never block the codec.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::order::{BitOrder, ByteOrder};
use crate::types::is_integer_literal;

/// Default bit length for a newly created field
pub const DEFAULT_BIT_LENGTH: u8 = 8;

/// A named bit-field mapped onto the 64-bit frame
///
/// `value` is kept as entered; `error` holds the latest advisory
/// validation message, if any. Overlap between fields is allowed by
/// design - on encode the later field in the list wins per bit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitField {
    pub id: Uuid,
    pub name: String,
    pub bit_start: u8,
    pub bit_length: u8,
    pub byte_order: ByteOrder,
    pub bit_order: BitOrder,
    pub signed: bool,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BitField {
    /// New field with the standard defaults: 8 bits at position 0,
    /// MSB byte and bit order, unsigned, no value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bit_start: 0,
            bit_length: DEFAULT_BIT_LENGTH,
            byte_order: ByteOrder::default(),
            bit_order: BitOrder::default(),
            signed: false,
            value: String::new(),
            error: None,
        }
    }

    /// Refresh the advisory error slot from the validator
    pub fn revalidate(&mut self) {
        self.error = validate_field(self);
    }
}

impl Default for BitField {
    fn default() -> Self {
        Self::new("")
    }
}

/// Value bounds implied by a bit length and signedness
pub fn value_bounds(bit_length: u8, signed: bool) -> (i128, i128) {
    let bits = u32::from(bit_length.clamp(1, 64));
    if signed {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    }
}

/// Parse a field's raw value text as an integer literal
///
/// Returns `None` for empty or non-numeric text (the encoder skips such
/// fields) and for literals too large to represent.
pub fn parse_field_value(raw: &str) -> Option<i128> {
    if !is_integer_literal(raw) {
        return None;
    }
    raw.parse().ok()
}

/// Advisory per-field validation, recomputed on every edit
///
/// Returns the first failing check's message. Failures never block
/// encode or decode; out-of-range values still encode as their wrapped
/// bit pattern.
pub fn validate_field(field: &BitField) -> Option<String> {
    if field.bit_start > 63 {
        return Some("Bit start must be between 0 and 63".to_string());
    }
    if !(1..=64).contains(&field.bit_length) {
        return Some("Bit length must be between 1 and 64".to_string());
    }
    if u16::from(field.bit_start) + u16::from(field.bit_length) > 64 {
        return Some("Value extends beyond the 64-bit frame".to_string());
    }
    if field.value.is_empty() {
        return None;
    }
    if !is_integer_literal(&field.value) {
        return Some("Value must be a valid number".to_string());
    }

    let (min, max) = value_bounds(field.bit_length, field.signed);
    match field.value.parse::<i128>() {
        Ok(v) if v >= min && v <= max => None,
        // Parse overflow means the literal is astronomically out of range
        _ => Some(format!("Value must be between {min} and {max}")),
    }
}
