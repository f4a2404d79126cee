//! Field-list import/export (JSON and CSV)
//!
//! The wire schemas carry six properties per field:
//! `name, bitStart, bitLength, byteOrder, signed, value`. Bit order is
//! not part of either schema and defaults to MSB on import; field ids
//! are regenerated. Import failures surface as one error at the file
//! boundary - rows are not individually validated here.

use bytemap_codec::{BitField, ByteOrder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Supported interchange formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Pick a format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// One field as serialized on the wire
///
/// CSV rows map positionally onto the same schema; the header row is
/// `name,bitStart,bitLength,byteOrder,signed,value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldRecord {
    name: String,
    bit_start: u8,
    bit_length: u8,
    byte_order: ByteOrder,
    signed: bool,
    #[serde(default)]
    value: String,
}

impl FieldRecord {
    fn from_field(field: &BitField) -> Self {
        Self {
            name: field.name.clone(),
            bit_start: field.bit_start,
            bit_length: field.bit_length,
            byte_order: field.byte_order,
            signed: field.signed,
            value: field.value.clone(),
        }
    }

    fn into_field(self) -> BitField {
        let mut field = BitField::new(self.name);
        field.bit_start = self.bit_start;
        field.bit_length = self.bit_length;
        field.byte_order = self.byte_order;
        // bit order is not preserved across export/import
        field.signed = self.signed;
        field.value = self.value;
        field.revalidate();
        field
    }
}

/// Serialize the field list as a JSON array
pub fn export_json(fields: &[BitField]) -> Result<String> {
    let records: Vec<FieldRecord> = fields.iter().map(FieldRecord::from_field).collect();
    serde_json::to_string_pretty(&records).map_err(|e| SessionError::Export(e.to_string()))
}

/// Parse a JSON array back into a field list
pub fn import_json(text: &str) -> Result<Vec<BitField>> {
    let records: Vec<FieldRecord> =
        serde_json::from_str(text).map_err(|e| SessionError::Import(e.to_string()))?;
    Ok(records.into_iter().map(FieldRecord::into_field).collect())
}

/// Serialize the field list as CSV with a header row
pub fn export_csv(fields: &[BitField]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for field in fields {
        writer
            .serialize(FieldRecord::from_field(field))
            .map_err(|e| SessionError::Export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SessionError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SessionError::Export(e.to_string()))
}

/// Parse CSV rows back into a field list
pub fn import_csv(text: &str) -> Result<Vec<BitField>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut fields = Vec::new();
    for record in reader.deserialize::<FieldRecord>() {
        let record = record.map_err(|e| SessionError::Import(e.to_string()))?;
        fields.push(record.into_field());
    }
    Ok(fields)
}

/// Export filename stamped to the minute: `byte-map-YYYYMMDDTHHMMZ.<ext>`
pub fn export_file_name(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "byte-map-{}.{}",
        at.format("%Y%m%dT%H%MZ"),
        format.extension()
    )
}
