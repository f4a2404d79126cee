//! Command handlers
//!
//! Each handler loads the persisted session, performs one operation,
//! and saves the session back when it mutated anything.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use bytemap_codec::{
    to_binary_string, to_hex_string, validate_value, BitOrder, ByteOrder, Frame, ValueCheck,
};
use bytemap_session::{
    export_csv, export_file_name, export_json, import_csv, import_json, load_session,
    save_session, ExportFormat, FieldUpdate, FileStore, SessionContext, SessionError,
};
use chrono::Utc;
use colored::Colorize;
use uuid::Uuid;

use crate::output;

/// Optional overrides for `fields add`
pub struct FieldInit {
    pub bit_start: Option<u8>,
    pub bit_length: Option<u8>,
    pub byte_order: Option<String>,
    pub bit_order: Option<String>,
    pub signed: bool,
    pub value: Option<String>,
}

pub fn types() -> Result<()> {
    output::print_types_table();
    Ok(())
}

pub fn convert(
    store: &FileStore,
    value: &str,
    type_name: &str,
    byte_order: Option<&str>,
    bit_order: &str,
) -> Result<()> {
    let ty = bytemap_codec::types::get(type_name)?;
    let mut ctx = load_session(store)?;

    // An explicit byte order becomes the new persisted preference
    let byte_order = match byte_order {
        Some(text) => {
            let order = parse_byte_order(text)?;
            if order != ctx.preferred_byte_order() {
                ctx.set_preferred_byte_order(order);
                save_session(store, &ctx)?;
            }
            order
        },
        None => ctx.preferred_byte_order(),
    };
    let bit_order = parse_bit_order(bit_order)?;

    let number = match validate_value(value, ty) {
        ValueCheck::Accepted(number) => number,
        // Empty or a lone sign renders as zero, like the live form
        ValueCheck::Pending => 0,
        ValueCheck::Rejected(reason) => bail!(reason),
    };

    let binary = to_binary_string(number, ty.byte_width, byte_order, bit_order);
    let hex = to_hex_string(number, ty.byte_width, byte_order, bit_order);
    output::print_conversion(ty, number, byte_order, bit_order, &binary, &hex);
    Ok(())
}

pub fn fields_add(store: &FileStore, name: &str, init: FieldInit) -> Result<()> {
    let mut ctx = load_session(store)?;
    let id = ctx.add_field(name);

    if let Some(bit_start) = init.bit_start {
        ctx.apply_update(id, FieldUpdate::SetBitStart(bit_start))?;
    }
    if let Some(bit_length) = init.bit_length {
        ctx.apply_update(id, FieldUpdate::SetBitLength(bit_length))?;
    }
    if let Some(text) = init.byte_order.as_deref() {
        ctx.apply_update(id, FieldUpdate::SetByteOrder(parse_byte_order(text)?))?;
    }
    if let Some(text) = init.bit_order.as_deref() {
        ctx.apply_update(id, FieldUpdate::SetBitOrder(parse_bit_order(text)?))?;
    }
    if init.signed {
        ctx.apply_update(id, FieldUpdate::SetSigned(true))?;
    }
    if let Some(value) = init.value {
        ctx.apply_update(id, FieldUpdate::SetValue(value))?;
    }

    save_session(store, &ctx)?;

    let field = ctx.field(id)?;
    println!("{} {}", "Added field".green(), field.name.bold());
    if let Some(error) = &field.error {
        println!("{} {}", "warning:".yellow(), error);
    }
    Ok(())
}

pub fn fields_list(store: &FileStore) -> Result<()> {
    let ctx = load_session(store)?;
    output::print_fields_table(ctx.fields());
    Ok(())
}

pub fn fields_set(store: &FileStore, field: &str, property: &str, new_value: &str) -> Result<()> {
    let mut ctx = load_session(store)?;
    let id = resolve_field(&ctx, field)?;

    let update = match property {
        "name" => FieldUpdate::SetName(new_value.to_string()),
        "bit-start" => FieldUpdate::SetBitStart(
            new_value
                .parse()
                .with_context(|| format!("Invalid bit start: {new_value}"))?,
        ),
        "bit-length" => FieldUpdate::SetBitLength(
            new_value
                .parse()
                .with_context(|| format!("Invalid bit length: {new_value}"))?,
        ),
        "byte-order" => FieldUpdate::SetByteOrder(parse_byte_order(new_value)?),
        "bit-order" => FieldUpdate::SetBitOrder(parse_bit_order(new_value)?),
        "signed" => FieldUpdate::SetSigned(
            new_value
                .parse()
                .with_context(|| format!("Invalid signed flag (true/false): {new_value}"))?,
        ),
        "value" => FieldUpdate::SetValue(new_value.to_string()),
        other => bail!(
            "Unknown property '{other}' (expected name, bit-start, bit-length, \
             byte-order, bit-order, signed, or value)"
        ),
    };

    ctx.apply_update(id, update)?;
    save_session(store, &ctx)?;

    let field = ctx.field(id)?;
    match &field.error {
        Some(error) => println!("{} {}", "warning:".yellow(), error),
        None => println!("{}", "OK".green()),
    }
    Ok(())
}

pub fn fields_remove(store: &FileStore, field: &str) -> Result<()> {
    let mut ctx = load_session(store)?;
    let id = resolve_field(&ctx, field)?;
    ctx.remove_field(id)?;
    save_session(store, &ctx)?;
    println!("{}", "Removed".green());
    Ok(())
}

pub fn encode(store: &FileStore) -> Result<()> {
    let ctx = load_session(store)?;
    if ctx.fields().is_empty() {
        println!("No fields defined. Add one with 'bytemapctl fields add <name>'.");
        return Ok(());
    }

    let frame = ctx.encode();
    output::print_frame(&frame);

    let skipped: Vec<&str> = ctx
        .fields()
        .iter()
        .filter(|f| bytemap_codec::parse_field_value(&f.value).is_none())
        .map(|f| f.name.as_str())
        .collect();
    if !skipped.is_empty() {
        println!(
            "{} no value for: {}",
            "skipped".yellow(),
            skipped.join(", ")
        );
    }
    Ok(())
}

pub fn decode(store: &FileStore, frame_text: Option<&str>) -> Result<()> {
    let mut ctx = load_session(store)?;
    if ctx.fields().is_empty() {
        println!("No fields defined. Add one with 'bytemapctl fields add <name>'.");
        return Ok(());
    }

    let frame = match frame_text {
        Some(text) => parse_frame(text)?,
        None => Frame::new(),
    };
    for (index, byte) in frame.as_bytes().iter().enumerate() {
        ctx.set_frame_byte(index, *byte)?;
    }

    output::print_frame(ctx.frame());
    output::print_decoded(ctx.fields(), &ctx.decode());
    Ok(())
}

pub fn reset(store: &FileStore) -> Result<()> {
    let mut ctx = load_session(store)?;
    ctx.reset_frame();
    save_session(store, &ctx)?;
    println!("{}", "Session reset".green());
    Ok(())
}

pub fn export(store: &FileStore, format: &str, output_dir: Option<&Path>) -> Result<()> {
    let format = ExportFormat::from_extension(format)
        .with_context(|| format!("Unknown export format: {format} (expected json or csv)"))?;

    let ctx = load_session(store)?;
    let text = match format {
        ExportFormat::Json => export_json(ctx.fields())?,
        ExportFormat::Csv => export_csv(ctx.fields())?,
    };

    let file_name = export_file_name(format, Utc::now());
    let path = output_dir.unwrap_or(Path::new(".")).join(&file_name);
    fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} {} field(s) to {}",
        "Exported".green(),
        ctx.fields().len(),
        path.display()
    );
    Ok(())
}

pub fn import(store: &FileStore, file: &Path) -> Result<()> {
    let format = file
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ExportFormat::from_extension)
        .with_context(|| format!("Cannot tell the format of {} from its extension", file.display()))?;

    let text =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    // Import failures surface as one error for the whole file
    let fields = match format {
        ExportFormat::Json => import_json(&text),
        ExportFormat::Csv => import_csv(&text),
    }
    .map_err(|e| match e {
        SessionError::Import(msg) => anyhow::anyhow!("Import failed: {msg}"),
        other => anyhow::Error::from(other),
    })?;

    let mut ctx = load_session(store)?;
    ctx.replace_fields(fields);
    save_session(store, &ctx)?;

    println!(
        "{} {} field(s) from {}",
        "Imported".green(),
        ctx.fields().len(),
        file.display()
    );
    Ok(())
}

/// Find a field by exact name, falling back to id prefix
fn resolve_field(ctx: &SessionContext, key: &str) -> Result<Uuid> {
    let by_name: Vec<Uuid> = ctx
        .fields()
        .iter()
        .filter(|f| f.name == key)
        .map(|f| f.id)
        .collect();
    match by_name.as_slice() {
        [id] => return Ok(*id),
        [] => {},
        _ => bail!("Field name '{key}' is ambiguous, use an id prefix"),
    }

    let prefix = key.to_lowercase();
    let by_id: Vec<Uuid> = ctx
        .fields()
        .iter()
        .filter(|f| f.id.to_string().starts_with(&prefix))
        .map(|f| f.id)
        .collect();
    match by_id.as_slice() {
        [id] => Ok(*id),
        [] => bail!("No field named or matching '{key}'"),
        _ => bail!("Id prefix '{key}' is ambiguous"),
    }
}

fn parse_byte_order(text: &str) -> Result<ByteOrder> {
    ByteOrder::from_str(text)
        .with_context(|| format!("Invalid byte order: {text} (expected MSB or LSB)"))
}

fn parse_bit_order(text: &str) -> Result<BitOrder> {
    BitOrder::from_str(text)
        .with_context(|| format!("Invalid bit order: {text} (expected MSB or LSB)"))
}

/// Parse a frame from spaced hex bytes or one contiguous hex run
fn parse_frame(text: &str) -> Result<Frame> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut frame = Frame::new();

    if tokens.len() > 1 {
        if tokens.len() > 8 {
            bail!("A frame holds at most 8 bytes, got {}", tokens.len());
        }
        for (index, token) in tokens.iter().enumerate() {
            frame.set_byte_hex(index, token)?;
        }
        return Ok(frame);
    }

    let run = tokens.first().copied().unwrap_or("");
    let digits = run
        .strip_prefix("0x")
        .or_else(|| run.strip_prefix("0X"))
        .unwrap_or(run);
    if digits.len() % 2 != 0 || digits.len() > 16 {
        bail!("Expected up to 16 hex digits, got '{run}'");
    }
    for (index, chunk) in digits.as_bytes().chunks(2).enumerate() {
        let pair = std::str::from_utf8(chunk).unwrap_or_default();
        frame.set_byte_hex(index, pair)?;
    }
    Ok(frame)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_spaced() {
        let frame = parse_frame("04 B0 ff").unwrap();
        assert_eq!(frame.as_bytes(), &[0x04, 0xB0, 0xFF, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_parse_frame_contiguous() {
        let frame = parse_frame("0x04B0").unwrap();
        assert_eq!(frame.as_bytes(), &[0x04, 0xB0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_parse_frame_rejects_overflow() {
        assert!(parse_frame("00 11 22 33 44 55 66 77 88").is_err());
        assert!(parse_frame("0011223344556677AA").is_err());
        assert!(parse_frame("ABC").is_err());
    }

    #[test]
    fn test_resolve_field_by_name_and_prefix() {
        let mut ctx = SessionContext::new();
        let id = ctx.add_field("speed");
        ctx.add_field("flags");

        assert_eq!(resolve_field(&ctx, "speed").unwrap(), id);

        let prefix = id.to_string()[..8].to_string();
        assert_eq!(resolve_field(&ctx, &prefix).unwrap(), id);

        assert!(resolve_field(&ctx, "nope").is_err());
    }

    #[test]
    fn test_resolve_field_ambiguous_name() {
        let mut ctx = SessionContext::new();
        ctx.add_field("dup");
        ctx.add_field("dup");
        assert!(resolve_field(&ctx, "dup").is_err());
    }
}
