//! Decimal to binary/hex rendering with byte and bit order control
//!
//! Renders an integer as its two's-complement bit pattern across a
//! fixed byte width, permuted by the requested byte and bit orders.
//! Range checking belongs to the type registry; these functions only
//! perform the transform and wrap out-of-width values modulo 2^bits.

use crate::order::{BitOrder, ByteOrder};

/// Two's-complement pattern of `value` in `byte_width * 8` bits
fn bit_pattern(value: i128, byte_width: u8) -> u64 {
    debug_assert!(
        (1..=8).contains(&byte_width),
        "Byte width out of range: {}",
        byte_width
    );

    let total_bits = u32::from(byte_width) * 8;
    // Truncation to u64 is exactly the modulo-2^64 two's complement
    let raw = value as u64;
    if total_bits >= 64 {
        raw
    } else {
        raw & ((1u64 << total_bits) - 1)
    }
}

/// Byte groups of the pattern in final serialized order
///
/// Group 0 starts as the most significant byte; bit-order reversal is
/// applied within each group before the whole-group swap, matching the
/// serialization rules of the frame codec.
fn ordered_groups(
    value: i128,
    byte_width: u8,
    byte_order: ByteOrder,
    bit_order: BitOrder,
) -> Vec<u8> {
    let raw = bit_pattern(value, byte_width);
    let mut groups: Vec<u8> = (0..byte_width)
        .rev()
        .map(|i| (raw >> (u32::from(i) * 8)) as u8)
        .collect();

    if bit_order.is_lsb_first() {
        for group in &mut groups {
            *group = group.reverse_bits();
        }
    }
    if byte_order.is_lsb_first() {
        groups.reverse();
    }
    groups
}

/// Render a value as space-separated 8-bit binary groups
///
/// # Example
///
/// ```rust
/// use bytemap_codec::{to_binary_string, BitOrder, ByteOrder};
///
/// let s = to_binary_string(-1, 1, ByteOrder::MsbFirst, BitOrder::MsbFirst);
/// assert_eq!(s, "11111111");
///
/// let s = to_binary_string(1, 2, ByteOrder::LsbFirst, BitOrder::MsbFirst);
/// assert_eq!(s, "00000001 00000000");
/// ```
pub fn to_binary_string(
    value: i128,
    byte_width: u8,
    byte_order: ByteOrder,
    bit_order: BitOrder,
) -> String {
    ordered_groups(value, byte_width, byte_order, bit_order)
        .iter()
        .map(|b| format!("{b:08b}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a value as space-separated `0xHH` tokens
///
/// Hex digits reflect the bit pattern selected by `bit_order`, grouped
/// as standard bytes; `byte_order` is applied to the final group
/// sequence. The hex view therefore always shows the same per-byte
/// patterns as the binary view.
pub fn to_hex_string(
    value: i128,
    byte_width: u8,
    byte_order: ByteOrder,
    bit_order: BitOrder,
) -> String {
    ordered_groups(value, byte_width, byte_order, bit_order)
        .iter()
        .map(|b| format!("0x{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
