//! Field/signal encode and decode over the 8-byte frame
//!
//! Packs named bit-fields into the 64-bit frame and unpacks them back
//! out. Field-width two's complement, the chunked byte/bit order
//! permutation, and the decode sign correction follow the frame
//! editor's exact semantics, including the cases where the permutation
//! lengthens a working pattern past the field's bit length.

use tracing::debug;

use crate::error::{CodecError, Result};
use crate::field::{parse_field_value, BitField};
use crate::frame::{Frame, FRAME_BITS};
use crate::order::{BitOrder, ByteOrder};

/// MSB-first two's-complement pattern of `value` in `bit_length` bits
///
/// Out-of-range values wrap modulo 2^bit_length; for in-range values
/// this is the plain binary (non-negative) or field-width two's
/// complement (negative) pattern.
fn pattern_bits(value: i128, bit_length: u8) -> Vec<bool> {
    debug_assert!(
        (1..=64).contains(&bit_length),
        "Bit length out of range: {}",
        bit_length
    );

    let bits = u32::from(bit_length);
    let raw = if bits >= 64 {
        value as u64
    } else {
        (value as u64) & ((1u64 << bits) - 1)
    };
    (0..bits).rev().map(|i| (raw >> i) & 1 == 1).collect()
}

/// Split an MSB-first pattern into 8-bit chunks, left-padding the
/// final partial chunk with zeros
fn chunks_of_8(bits: &[bool]) -> Vec<Vec<bool>> {
    bits.chunks(8)
        .map(|chunk| {
            let mut padded = vec![false; 8 - chunk.len()];
            padded.extend_from_slice(chunk);
            padded
        })
        .collect()
}

/// Apply the byte-order and bit-order permutation to a working pattern
///
/// Byte-order reversal swaps whole 8-bit chunks (final partial chunk
/// padded before the swap); bit-order reversal then mirrors each
/// chunk independently. Either step may lengthen the pattern to the
/// next chunk boundary - the extra bits are part of the permutation's
/// defined behavior, not an error. The same permutation is applied on
/// encode and on decode.
fn permute(bits: Vec<bool>, byte_order: ByteOrder, bit_order: BitOrder) -> Vec<bool> {
    let mut bits = bits;

    if byte_order.is_lsb_first() {
        let mut chunks = chunks_of_8(&bits);
        chunks.reverse();
        bits = chunks.concat();
    }

    if bit_order.is_lsb_first() {
        bits = chunks_of_8(&bits)
            .into_iter()
            .flat_map(|chunk| chunk.into_iter().rev())
            .collect();
    }

    bits
}

/// Encode all fields into a fresh frame
///
/// Fields with an empty or non-numeric value are skipped, leaving
/// their span at the zero default. Fields are applied in list order;
/// where two fields overlap, the later one wins per bit.
pub fn encode_frame(fields: &[BitField]) -> Frame {
    let mut frame = Frame::new();
    for field in fields {
        let Some(value) = parse_field_value(&field.value) else {
            continue;
        };
        write_field(&mut frame, field, value);
    }
    frame
}

/// Write one field's permuted pattern into the frame
fn write_field(frame: &mut Frame, field: &BitField, value: i128) {
    // Lengths beyond the frame clamp to 64; the validator flags the
    // field but the write stays well-defined
    let len = u16::from(field.bit_length.min(64));
    if len == 0 {
        return;
    }

    let bits = permute(
        pattern_bits(value, len as u8),
        field.byte_order,
        field.bit_order,
    );

    let mut dropped = 0u16;
    for k in 0..len {
        let pos = u16::from(field.bit_start) + k;
        if pos >= FRAME_BITS {
            dropped += 1;
            continue;
        }
        frame.set_bit(pos, bits[usize::from(k)]);
    }
    if dropped > 0 {
        debug!(
            name = %field.name,
            dropped,
            "field bits beyond the 64-bit frame were dropped"
        );
    }
}

/// Decode one field's value out of the frame
///
/// The sign correction inspects the first bit of the pre-permutation
/// slice and subtracts 2^bit_length using the field's bit length. Both
/// choices are kept even under LSB orderings, where the inspected bit
/// is not the logical sign bit - decoding is intentionally not the
/// inverse of encoding for negative LSB-ordered values.
pub fn decode_field(frame: &Frame, field: &BitField) -> Result<i128> {
    let start = u16::from(field.bit_start);
    let len = u16::from(field.bit_length);
    let end = (start + len).min(FRAME_BITS);

    if start >= FRAME_BITS || len == 0 {
        return Err(CodecError::SpanOutOfFrame {
            bit_start: field.bit_start,
            bit_length: field.bit_length,
        });
    }

    let slice: Vec<bool> = (start..end).map(|pos| frame.bit(pos)).collect();
    let leading_bit_pre_permutation = slice[0];

    let bits = permute(slice, field.byte_order, field.bit_order);
    let unsigned = bits.iter().fold(0u64, |acc, b| (acc << 1) | u64::from(*b));

    let mut value = i128::from(unsigned);
    if field.signed && leading_bit_pre_permutation {
        value -= 1i128 << u32::from(field.bit_length.min(64));
    }
    Ok(value)
}

/// Decode every field independently
///
/// Results are returned in field-list order; one field's decode error
/// never affects the others.
pub fn decode_frame(frame: &Frame, fields: &[BitField]) -> Vec<Result<i128>> {
    fields.iter().map(|f| decode_field(frame, f)).collect()
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    fn field(bit_start: u8, bit_length: u8, value: &str) -> BitField {
        let mut f = BitField::new("f");
        f.bit_start = bit_start;
        f.bit_length = bit_length;
        f.value = value.to_string();
        f
    }

    #[test]
    fn test_encode_nibble_fills_top_bits() {
        let frame = encode_frame(&[field(0, 4, "15")]);
        assert_eq!(frame.byte(0).unwrap(), 0xF0);
        assert_eq!(&frame.as_bytes()[1..], &[0u8; 7]);
    }

    #[test]
    fn test_encode_empty_and_non_numeric_skipped() {
        let frame = encode_frame(&[field(0, 8, ""), field(8, 8, "abc")]);
        assert_eq!(frame, Frame::new());
    }

    #[test]
    fn test_encode_cross_byte_unaligned() {
        // 8 bits starting at bit 4 span the low nibble of byte 0 and
        // the high nibble of byte 1, contiguously
        let frame = encode_frame(&[field(4, 8, "255")]);
        assert_eq!(frame.byte(0).unwrap(), 0x0F);
        assert_eq!(frame.byte(1).unwrap(), 0xF0);
    }

    #[test]
    fn test_encode_signed_negative_field_width() {
        let mut f = field(0, 4, "-1");
        f.signed = true;
        let frame = encode_frame(&[f]);
        assert_eq!(frame.byte(0).unwrap(), 0xF0);

        let mut f = field(0, 8, "-128");
        f.signed = true;
        let frame = encode_frame(&[f]);
        assert_eq!(frame.byte(0).unwrap(), 0x80);
    }

    #[test]
    fn test_encode_out_of_range_wraps() {
        // 256 in 8 bits wraps to 0x00 - a frame byte, not an error
        let frame = encode_frame(&[field(0, 8, "256")]);
        assert_eq!(frame.byte(0).unwrap(), 0x00);

        let frame = encode_frame(&[field(0, 8, "257")]);
        assert_eq!(frame.byte(0).unwrap(), 0x01);
    }

    #[test]
    fn test_encode_overlap_last_write_wins() {
        let first = field(0, 4, "15");
        let second = field(0, 4, "0");
        let frame = encode_frame(&[first.clone(), second.clone()]);
        assert_eq!(frame.byte(0).unwrap(), 0x00);

        let frame = encode_frame(&[second, first]);
        assert_eq!(frame.byte(0).unwrap(), 0xF0);
    }

    #[test]
    fn test_encode_byte_order_lsb() {
        let mut f = field(0, 16, "1");
        f.byte_order = ByteOrder::LsbFirst;
        let frame = encode_frame(&[f]);
        assert_eq!(frame.byte(0).unwrap(), 0x01);
        assert_eq!(frame.byte(1).unwrap(), 0x00);
    }

    #[test]
    fn test_encode_byte_order_lsb_partial_chunk() {
        // 12-bit value 0xAB3: the final 4-bit chunk pads to a full
        // byte before the swap, so the written pattern is the padded
        // low chunk followed by the start of the high chunk
        let mut f = field(0, 12, "2739");
        f.byte_order = ByteOrder::LsbFirst;
        let frame = encode_frame(&[f]);
        assert_eq!(frame.byte(0).unwrap(), 0x03);
        assert_eq!(frame.byte(1).unwrap(), 0xA0);
    }

    #[test]
    fn test_encode_bit_order_lsb() {
        let mut f = field(0, 8, "1");
        f.bit_order = BitOrder::LsbFirst;
        let frame = encode_frame(&[f]);
        assert_eq!(frame.byte(0).unwrap(), 0x80);
    }

    #[test]
    fn test_encode_bit_order_lsb_partial_chunk() {
        // A 4-bit pattern pads to 8 before the mirror, so value 1
        // lands at the top of the nibble
        let mut f = field(0, 4, "1");
        f.bit_order = BitOrder::LsbFirst;
        let frame = encode_frame(&[f]);
        assert_eq!(frame.byte(0).unwrap(), 0x80);
    }

    #[test]
    fn test_encode_overflow_bits_dropped() {
        // Invalid span: starts at 60, 8 bits long. The four in-frame
        // bits are written, the rest dropped, no panic
        let frame = encode_frame(&[field(60, 8, "255")]);
        assert_eq!(frame.byte(7).unwrap(), 0x0F);
    }

    #[test]
    fn test_decode_nibble() {
        let frame = Frame::from_bytes([0xF0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(decode_field(&frame, &field(0, 4, "")).unwrap(), 15);
        assert_eq!(decode_field(&frame, &field(4, 4, "")).unwrap(), 0);
    }

    #[test]
    fn test_decode_signed() {
        let frame = Frame::from_bytes([0xFF, 0, 0, 0, 0, 0, 0, 0]);
        let mut f = field(0, 8, "");
        f.signed = true;
        assert_eq!(decode_field(&frame, &f).unwrap(), -1);

        let frame = Frame::from_bytes([0x80, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(decode_field(&frame, &f).unwrap(), -128);
    }

    #[test]
    fn test_decode_byte_order_lsb() {
        let frame = Frame::from_bytes([0x01, 0x00, 0, 0, 0, 0, 0, 0]);
        let mut f = field(0, 16, "");
        f.byte_order = ByteOrder::LsbFirst;
        assert_eq!(decode_field(&frame, &f).unwrap(), 1);

        let frame = Frame::from_bytes([0x00, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(decode_field(&frame, &f).unwrap(), 256);
    }

    #[test]
    fn test_decode_bit_order_lsb() {
        let frame = Frame::from_bytes([0x80, 0, 0, 0, 0, 0, 0, 0]);
        let mut f = field(0, 8, "");
        f.bit_order = BitOrder::LsbFirst;
        assert_eq!(decode_field(&frame, &f).unwrap(), 1);
    }

    #[test]
    fn test_decode_sign_check_is_pre_permutation() {
        // Encoding -32768 as a 16-bit LSB-byte-order field puts the
        // sign bit in the second frame byte; the decode sign check
        // still looks at the slice's first bit, so the correction
        // does not fire and the value comes back unsigned
        let mut f = field(0, 16, "-32768");
        f.signed = true;
        f.byte_order = ByteOrder::LsbFirst;
        let frame = encode_frame(&[f.clone()]);
        assert_eq!(frame.byte(0).unwrap(), 0x00);
        assert_eq!(frame.byte(1).unwrap(), 0x80);

        f.value.clear();
        assert_eq!(decode_field(&frame, &f).unwrap(), 32768);
    }

    #[test]
    fn test_decode_sign_check_fires_on_physical_first_bit() {
        // Conversely, a set first bit triggers the correction even
        // though byte reordering moves it away from the sign position
        let frame = Frame::from_bytes([0x80, 0x00, 0, 0, 0, 0, 0, 0]);
        let mut f = field(0, 16, "");
        f.signed = true;
        f.byte_order = ByteOrder::LsbFirst;
        assert_eq!(decode_field(&frame, &f).unwrap(), 128 - 65536);
    }

    #[test]
    fn test_decode_span_out_of_frame() {
        let frame = Frame::new();
        let mut f = field(0, 8, "");
        f.bit_start = 64;
        assert_eq!(
            decode_field(&frame, &f).unwrap_err(),
            CodecError::SpanOutOfFrame {
                bit_start: 64,
                bit_length: 8
            }
        );
    }

    #[test]
    fn test_decode_truncated_span_still_decodes() {
        // Span sticks out past the frame: the in-frame bits decode,
        // the validator is what flags the field
        let frame = Frame::from_bytes([0, 0, 0, 0, 0, 0, 0, 0x0F]);
        let f = field(60, 8, "");
        assert_eq!(decode_field(&frame, &f).unwrap(), 15);
    }

    #[test]
    fn test_decode_frame_isolates_errors() {
        let frame = Frame::from_bytes([0xAB, 0, 0, 0, 0, 0, 0, 0]);
        let good = field(0, 8, "");
        let mut bad = field(0, 8, "");
        bad.bit_start = 70;

        let results = decode_frame(&frame, &[bad, good]);
        assert!(results[0].is_err());
        assert_eq!(results[1].as_ref().unwrap(), &0xAB);
    }

    #[test]
    fn test_roundtrip_msb_signed_odd_width() {
        for value in [-32i128, -5, -1, 0, 1, 17, 31] {
            let mut f = field(3, 6, &value.to_string());
            f.signed = true;
            let frame = encode_frame(&[f.clone()]);
            assert_eq!(decode_field(&frame, &f).unwrap(), value, "value {value}");
        }
    }

    #[test]
    fn test_roundtrip_all_orders_byte_aligned() {
        for byte_order in [ByteOrder::MsbFirst, ByteOrder::LsbFirst] {
            for bit_order in [BitOrder::MsbFirst, BitOrder::LsbFirst] {
                for value in [0i128, 1, 0xAB, 0xABCD, 0xFFFF] {
                    let mut f = field(8, 16, &value.to_string());
                    f.byte_order = byte_order;
                    f.bit_order = bit_order;
                    let frame = encode_frame(&[f.clone()]);
                    assert_eq!(
                        decode_field(&frame, &f).unwrap(),
                        value,
                        "value {value} under {byte_order}/{bit_order}"
                    );
                }
            }
        }
    }
}
