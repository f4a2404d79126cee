//! IEC 61131-3 integer type registry and value validation
//!
//! A fixed table of named fixed-width integer types used to bound the
//! values accepted by the numeric converter. Lookup is exact-match by
//! name with no fallback; the table itself never changes at runtime.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CodecError, Result};

/// A named fixed-width integer type
///
/// `min`/`max` are exactly representable in `byte_width * 8` bits under
/// the type's signedness. BOOL is the 1-bit/1-byte special case with
/// range [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerType {
    pub name: &'static str,
    pub byte_width: u8,
    pub signed: bool,
    pub min: i128,
    pub max: i128,
}

impl IntegerType {
    pub fn total_bits(&self) -> u32 {
        u32::from(self.byte_width) * 8
    }

    pub fn contains(&self, value: i128) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The full IEC 61131-3 integer type set, in display order
pub const TYPES: &[IntegerType] = &[
    IntegerType {
        name: "SINT",
        byte_width: 1,
        signed: true,
        min: -128,
        max: 127,
    },
    IntegerType {
        name: "USINT",
        byte_width: 1,
        signed: false,
        min: 0,
        max: 255,
    },
    IntegerType {
        name: "INT",
        byte_width: 2,
        signed: true,
        min: -32768,
        max: 32767,
    },
    IntegerType {
        name: "UINT",
        byte_width: 2,
        signed: false,
        min: 0,
        max: 65535,
    },
    IntegerType {
        name: "DINT",
        byte_width: 4,
        signed: true,
        min: -2147483648,
        max: 2147483647,
    },
    IntegerType {
        name: "UDINT",
        byte_width: 4,
        signed: false,
        min: 0,
        max: 4294967295,
    },
    IntegerType {
        name: "LINT",
        byte_width: 8,
        signed: true,
        min: -9223372036854775808,
        max: 9223372036854775807,
    },
    IntegerType {
        name: "ULINT",
        byte_width: 8,
        signed: false,
        min: 0,
        max: 18446744073709551615,
    },
    IntegerType {
        name: "BOOL",
        byte_width: 1,
        signed: false,
        min: 0,
        max: 1,
    },
];

/// Exact-match lookup by type name
pub fn lookup(name: &str) -> Option<&'static IntegerType> {
    TYPES.iter().find(|t| t.name == name)
}

/// Exact-match lookup, erroring on unknown names
pub fn get(name: &str) -> Result<&'static IntegerType> {
    lookup(name).ok_or_else(|| CodecError::UnknownType(name.to_string()))
}

static INT_LITERAL: OnceLock<Regex> = OnceLock::new();

/// Whether `raw` is a decimal integer literal with an optional leading sign
pub(crate) fn is_integer_literal(raw: &str) -> bool {
    let re = INT_LITERAL.get_or_init(|| {
        // Hard-coded pattern, cannot fail to compile
        Regex::new(r"^-?\d+$").expect("static integer-literal pattern")
    });
    re.is_match(raw)
}

/// Outcome of validating raw input text against an integer type
///
/// Validation is advisory: the caller is a live editable form, so the
/// transient "still typing" states (empty input, a lone minus sign) are
/// distinguished from actual rejections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueCheck {
    /// Parsed and in range
    Accepted(i128),
    /// Empty input or a lone `-` on a signed type
    Pending,
    /// Rejected, with a human-readable reason
    Rejected(String),
}

/// Validate raw input text against a type's signedness and range
pub fn validate_value(raw: &str, ty: &IntegerType) -> ValueCheck {
    if raw.is_empty() {
        return ValueCheck::Pending;
    }

    if raw == "-" {
        if !ty.signed {
            return ValueCheck::Rejected(format!("{} cannot be negative", ty.name));
        }
        return ValueCheck::Pending;
    }

    if !is_integer_literal(raw) {
        return ValueCheck::Rejected("Value must be a valid number".to_string());
    }

    if !ty.signed && raw.starts_with('-') {
        return ValueCheck::Rejected(format!("{} cannot be negative", ty.name));
    }

    // Literals too large for i128 are far outside every type's range
    match raw.parse::<i128>() {
        Ok(value) if ty.contains(value) => ValueCheck::Accepted(value),
        _ => ValueCheck::Rejected(format!("Value must be between {} and {}", ty.min, ty.max)),
    }
}
