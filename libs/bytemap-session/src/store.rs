//! Caller-local key-value persistence
//!
//! A small file-backed key-value store holding the session's two
//! persisted entries: the field list and the byte-order preference.
//! The whole session is loaded once at startup and written back after
//! every mutation by the caller - persistence stays an explicit
//! adapter call, never embedded in the setters themselves.

use std::fs;
use std::path::{Path, PathBuf};

use bytemap_codec::{BitField, ByteOrder};
use serde_json::{Map, Value};
use tracing::debug;

use crate::context::SessionContext;
use crate::error::{Result, SessionError};

/// Store key for the persisted field list
pub const FIELDS_KEY: &str = "byte-map.fields";

/// Store key for the numeric converter's byte-order preference
pub const BYTE_ORDER_KEY: &str = "byte-map.byte-order";

/// JSON-document key-value store at a fixed path
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document; a missing file is an empty store
    fn read_doc(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let text = fs::read_to_string(&self.path)?;
        let doc: Value = serde_json::from_str(&text)
            .map_err(|e| SessionError::StoreFormat(e.to_string()))?;
        match doc {
            Value::Object(map) => Ok(map),
            other => Err(SessionError::StoreFormat(format!(
                "expected a JSON object at the top level, got {other}"
            ))),
        }
    }

    fn write_doc(&self, doc: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(doc.clone()))
            .map_err(|e| SessionError::StoreFormat(e.to_string()))?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_doc()?.get(key).cloned())
    }

    pub fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut doc = self.read_doc()?;
        doc.insert(key.to_string(), value);
        self.write_doc(&doc)
    }
}

/// Load the session from the store, falling back to defaults for
/// missing keys
pub fn load_session(store: &FileStore) -> Result<SessionContext> {
    let fields: Vec<BitField> = match store.get(FIELDS_KEY)? {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| SessionError::StoreFormat(e.to_string()))?,
        None => Vec::new(),
    };
    let byte_order: ByteOrder = match store.get(BYTE_ORDER_KEY)? {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| SessionError::StoreFormat(e.to_string()))?,
        None => ByteOrder::default(),
    };

    debug!(fields = fields.len(), path = %store.path().display(), "session loaded");
    Ok(SessionContext::from_parts(fields, byte_order))
}

/// Overwrite both persisted keys from the current session state
pub fn save_session(store: &FileStore, ctx: &SessionContext) -> Result<()> {
    let fields = serde_json::to_value(ctx.fields())
        .map_err(|e| SessionError::StoreFormat(e.to_string()))?;
    let byte_order = serde_json::to_value(ctx.preferred_byte_order())
        .map_err(|e| SessionError::StoreFormat(e.to_string()))?;

    store.set(FIELDS_KEY, fields)?;
    store.set(BYTE_ORDER_KEY, byte_order)?;
    debug!(path = %store.path().display(), "session saved");
    Ok(())
}
