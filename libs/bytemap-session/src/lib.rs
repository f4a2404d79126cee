//! bytemap-session - Session state for byte-map
//!
//! Owns what the codec deliberately does not: the editable field list,
//! the current frame, the byte-order preference, their persistence
//! between runs, and the JSON/CSV interchange formats. The codec
//! crate stays pure; this crate is the stateful caller around it.
//!
//! # Example
//!
//! ```rust
//! use bytemap_session::{FieldUpdate, SessionContext};
//!
//! let mut ctx = SessionContext::new();
//! let id = ctx.add_field("level");
//! ctx.apply_update(id, FieldUpdate::SetBitLength(4)).unwrap();
//! ctx.apply_update(id, FieldUpdate::SetValue("15".into())).unwrap();
//!
//! let frame = ctx.encode();
//! assert_eq!(frame.byte(0).unwrap(), 0xF0);
//! ```

pub mod context;
pub mod error;
pub mod export;
pub mod store;

// Re-exports for convenience
pub use context::{FieldUpdate, SessionContext};
pub use error::{Result, SessionError};
pub use export::{
    export_csv, export_file_name, export_json, import_csv, import_json, ExportFormat,
};
pub use store::{load_session, save_session, FileStore, BYTE_ORDER_KEY, FIELDS_KEY};
