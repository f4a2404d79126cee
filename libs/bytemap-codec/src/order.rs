//! Byte and bit ordering for frame serialization
//!
//! Two independent axes control how a value's bit pattern is laid out:
//! the order of bytes within the serialized sequence, and the order of
//! bits within each byte. Both default to most-significant-first.

use serde::{Deserialize, Serialize};

/// Order of bytes within a serialized multi-byte value
///
/// `MsbFirst` is big-endian (network byte order): the most significant
/// byte sits at the lowest address. `LsbFirst` is little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Most significant byte first (big-endian)
    #[serde(rename = "MSB")]
    MsbFirst,

    /// Least significant byte first (little-endian)
    #[serde(rename = "LSB")]
    LsbFirst,
}

impl ByteOrder {
    /// Convert from common string representations
    ///
    /// Supports "MSB"/"LSB" (the wire literals) plus the usual
    /// endianness aliases.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MSB" | "BE" | "BIG_ENDIAN" | "BIGENDIAN" => Some(Self::MsbFirst),
            "LSB" | "LE" | "LITTLE_ENDIAN" | "LITTLEENDIAN" => Some(Self::LsbFirst),
            _ => None,
        }
    }

    /// Wire literal used by the import/export schemas
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MsbFirst => "MSB",
            Self::LsbFirst => "LSB",
        }
    }

    pub fn is_msb_first(&self) -> bool {
        matches!(self, Self::MsbFirst)
    }

    pub fn is_lsb_first(&self) -> bool {
        matches!(self, Self::LsbFirst)
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for ByteOrder {
    /// Default to most-significant-byte first (network byte order)
    fn default() -> Self {
        Self::MsbFirst
    }
}

/// Order of bits within each serialized byte
///
/// `LsbFirst` reverses the bit positions inside every 8-bit group
/// independently; the byte sequence itself is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitOrder {
    /// Most significant bit at the lowest bit position
    #[serde(rename = "MSB")]
    MsbFirst,

    /// Least significant bit at the lowest bit position
    #[serde(rename = "LSB")]
    LsbFirst,
}

impl BitOrder {
    /// Convert from common string representations
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MSB" => Some(Self::MsbFirst),
            "LSB" => Some(Self::LsbFirst),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MsbFirst => "MSB",
            Self::LsbFirst => "LSB",
        }
    }

    pub fn is_msb_first(&self) -> bool {
        matches!(self, Self::MsbFirst)
    }

    pub fn is_lsb_first(&self) -> bool {
        matches!(self, Self::LsbFirst)
    }
}

impl std::fmt::Display for BitOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for BitOrder {
    fn default() -> Self {
        Self::MsbFirst
    }
}
