//! Terminal rendering helpers
//!
//! All tables are plain fixed-width columns. Padding happens before
//! coloring - ANSI escapes would otherwise count toward the width.
//! Zero bytes render dimmed so the populated parts of a frame stand
//! out.

use bytemap_codec::{BitField, BitOrder, ByteOrder, CodecError, Frame, IntegerType, TYPES};
use colored::Colorize;

pub fn print_types_table() {
    let header = format!("{:<8} {:>5}  {:<8} {}", "TYPE", "BYTES", "SIGN", "RANGE");
    println!("{}", header.bold());
    for ty in TYPES {
        println!(
            "{:<8} {:>5}  {:<8} {} to {}",
            ty.name,
            ty.byte_width,
            if ty.signed { "signed" } else { "unsigned" },
            ty.min,
            ty.max
        );
    }
}

pub fn print_conversion(
    ty: &IntegerType,
    value: i128,
    byte_order: ByteOrder,
    bit_order: BitOrder,
    binary: &str,
    hex: &str,
) {
    let width = ty.byte_width;
    println!(
        "{} {} ({} byte{}, {} to {})",
        "Type:  ".bold(),
        ty.name,
        width,
        if width > 1 { "s" } else { "" },
        ty.min,
        ty.max
    );
    println!("{} {}", "Value: ".bold(), value);
    println!(
        "{} {} first bytes, {} first bits",
        "Order: ".bold(),
        byte_order,
        bit_order
    );
    println!();
    println!("{} {}", "Binary:".bold(), binary);
    println!("{} {}", "Hex:   ".bold(), hex);
    println!();

    // Memory map: address order with per-position byte labels
    let groups: Vec<&str> = binary.split(' ').collect();
    let labels: Vec<String> = (0..groups.len())
        .map(|index| {
            if byte_order.is_msb_first() {
                format!("Byte {index}")
            } else {
                format!("Byte {}", groups.len() - index - 1)
            }
        })
        .collect();

    for label in &labels {
        print!("{}", format!("{label:<10}").dimmed());
    }
    println!();
    for group in &groups {
        print_cell(group, group.contains('1'));
    }
    println!();
}

pub fn print_frame(frame: &Frame) {
    for index in 0..frame.as_bytes().len() {
        print!("{}", format!("{:<10}", format!("Byte {index}")).dimmed());
    }
    println!();

    for hex in frame.hex_bytes() {
        print_cell(&format!("0x{hex}"), hex != "00");
    }
    println!();

    for bits in frame.bit_strings() {
        print_cell(&bits, bits.contains('1'));
    }
    println!();
}

/// One fixed-width cell, highlighted when it carries set bits
fn print_cell(text: &str, highlight: bool) {
    let padded = format!("{text:<10}");
    if highlight {
        print!("{}", padded.blue());
    } else {
        print!("{}", padded.dimmed());
    }
}

pub fn print_fields_table(fields: &[BitField]) {
    if fields.is_empty() {
        println!("No fields defined. Add one with 'bytemapctl fields add <name>'.");
        return;
    }

    let header = format!(
        "{:<16} {:>5} {:>4}  {:<5} {:<5} {:<6} {:<12} {:<10} {}",
        "NAME", "START", "LEN", "BYTES", "BITS", "SIGN", "VALUE", "ID", "STATUS"
    );
    println!("{}", header.bold());

    for field in fields {
        let id = field.id.to_string();
        let row = format!(
            "{:<16} {:>5} {:>4}  {:<5} {:<5} {:<6} {:<12} {:<10}",
            field.name,
            field.bit_start,
            field.bit_length,
            field.byte_order,
            field.bit_order,
            if field.signed { "yes" } else { "no" },
            field.value,
            &id[..8]
        );
        match &field.error {
            Some(error) => println!("{row} {}", error.yellow()),
            None => println!("{row} {}", "ok".green()),
        }
    }
}

pub fn print_decoded(fields: &[BitField], results: &[Result<i128, CodecError>]) {
    println!();
    let header = format!("{:<16} {}", "FIELD", "DECODED");
    println!("{}", header.bold());
    for (field, result) in fields.iter().zip(results) {
        match result {
            Ok(value) => println!("{:<16} {}", field.name, value.to_string().blue()),
            // Per-field decode failures surface as the literal value
            Err(_) => println!("{:<16} {}", field.name, "Error".red()),
        }
    }
}
