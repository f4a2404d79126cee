//! Session context owning the field list and the current frame
//!
//! The editable state behind the frame mapper: a list of bit-fields,
//! the 8-byte frame they apply to, and the byte-order preference of
//! the numeric converter. Field edits go through explicit update
//! operations; every applied update revalidates the touched field.

use bytemap_codec::{
    decode_frame, encode_frame, BitField, BitOrder, ByteOrder, CodecError, Frame,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, SessionError};

/// One explicit edit to a single field
///
/// Replaces the frame editor's generic property setter with a tagged
/// union so every mutation is a named, independently validated case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    SetName(String),
    SetBitStart(u8),
    SetBitLength(u8),
    SetByteOrder(ByteOrder),
    SetBitOrder(BitOrder),
    SetSigned(bool),
    SetValue(String),
}

/// Caller-owned session state
///
/// The codec functions stay pure; this context is the single place
/// that mutates fields and frame, one editor at a time.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    fields: Vec<BitField>,
    frame: Frame,
    preferred_byte_order: ByteOrder,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a context from persisted parts
    pub fn from_parts(fields: Vec<BitField>, preferred_byte_order: ByteOrder) -> Self {
        let mut ctx = Self {
            fields,
            frame: Frame::new(),
            preferred_byte_order,
        };
        for field in &mut ctx.fields {
            field.revalidate();
        }
        ctx
    }

    pub fn fields(&self) -> &[BitField] {
        &self.fields
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn preferred_byte_order(&self) -> ByteOrder {
        self.preferred_byte_order
    }

    pub fn set_preferred_byte_order(&mut self, order: ByteOrder) {
        self.preferred_byte_order = order;
    }

    /// Append a new field with the standard defaults
    pub fn add_field(&mut self, name: impl Into<String>) -> Uuid {
        let field = BitField::new(name);
        let id = field.id;
        self.fields.push(field);
        debug!(%id, "field added");
        id
    }

    pub fn field(&self, id: Uuid) -> Result<&BitField> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .ok_or(SessionError::FieldNotFound(id))
    }

    pub fn remove_field(&mut self, id: Uuid) -> Result<()> {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != id);
        if self.fields.len() == before {
            return Err(SessionError::FieldNotFound(id));
        }
        debug!(%id, "field removed");
        Ok(())
    }

    /// Apply one update to one field and revalidate it
    ///
    /// Validation failures are stored on the field, not returned: they
    /// are advisory and never make the edit itself fail.
    pub fn apply_update(&mut self, id: Uuid, update: FieldUpdate) -> Result<()> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(SessionError::FieldNotFound(id))?;

        match update {
            FieldUpdate::SetName(name) => field.name = name,
            FieldUpdate::SetBitStart(bit_start) => field.bit_start = bit_start,
            FieldUpdate::SetBitLength(bit_length) => field.bit_length = bit_length,
            FieldUpdate::SetByteOrder(order) => field.byte_order = order,
            FieldUpdate::SetBitOrder(order) => field.bit_order = order,
            FieldUpdate::SetSigned(signed) => field.signed = signed,
            FieldUpdate::SetValue(value) => field.value = value,
        }
        field.revalidate();
        Ok(())
    }

    /// Replace the whole field list (import path); each field is
    /// revalidated on the way in
    pub fn replace_fields(&mut self, fields: Vec<BitField>) {
        self.fields = fields;
        for field in &mut self.fields {
            field.revalidate();
        }
        debug!(count = self.fields.len(), "field list replaced");
    }

    pub fn set_frame_byte(&mut self, index: usize, value: u8) -> Result<()> {
        self.frame.set_byte(index, value)?;
        Ok(())
    }

    /// Set a frame byte from hex text as entered per byte cell
    pub fn set_frame_byte_hex(&mut self, index: usize, hex: &str) -> Result<()> {
        self.frame.set_byte_hex(index, hex)?;
        Ok(())
    }

    /// Reset to an empty frame
    ///
    /// Fields do not survive a frame reset - they are reference data
    /// applied to whatever frame is current, so the list clears too.
    pub fn reset_frame(&mut self) {
        self.frame = Frame::new();
        self.fields.clear();
        debug!("frame and field list reset");
    }

    /// Encode the current field list into a fresh frame
    pub fn encode(&self) -> Frame {
        encode_frame(&self.fields)
    }

    /// Decode every field from the current frame
    pub fn decode(&self) -> Vec<std::result::Result<i128, CodecError>> {
        decode_frame(&self.frame, &self.fields)
    }
}
