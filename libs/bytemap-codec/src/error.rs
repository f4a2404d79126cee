//! Error types for bytemap-codec

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Frame byte index out of range: {0}")]
    ByteIndexOutOfRange(usize),

    #[error("Invalid hex byte: {0}")]
    InvalidHexByte(String),

    #[error("Field span outside the 64-bit frame: start {bit_start}, length {bit_length}")]
    SpanOutOfFrame { bit_start: u8, bit_length: u8 },

    #[error("Unknown integer type: {0}")]
    UnknownType(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
