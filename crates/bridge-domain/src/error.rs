// error.rs
use thiserror::Error;

/// Errores del dominio de traducción de esquemas.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid field spec '{0}': expected 'name:type'")]
    InvalidFieldSpec(String),

    #[error("could not decode source schema: {0}")]
    SchemaDecode(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SchemaDecode(e.to_string())
    }
}
