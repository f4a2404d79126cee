//! Error types for bytemap-session

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Field not found: {0}")]
    FieldNotFound(Uuid),

    #[error(transparent)]
    Codec(#[from] bytemap_codec::CodecError),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed store document: {0}")]
    StoreFormat(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_not_found_error() {
        let id = Uuid::nil();
        let err = SessionError::FieldNotFound(id);
        assert_eq!(
            err.to_string(),
            "Field not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_import_error() {
        let err = SessionError::Import("bad header".to_string());
        assert_eq!(err.to_string(), "Import error: bad header");
    }
}
