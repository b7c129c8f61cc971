// field_spec.rs
//! Especificaciones planas de campos destino (`"nombre:tipo"`).
//!
//! El catálogo destino sólo admite campos escalares; cualquier tipo no
//! reconocido se trata como `string`.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    String,
    Integer,
    Number,
    Boolean,
}

impl DestinationType {
    /// Resuelve un nombre de tipo sin distinguir mayúsculas. Total.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "integer" => DestinationType::Integer,
            "number" => DestinationType::Number,
            "boolean" => DestinationType::Boolean,
            _ => DestinationType::String,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::String => "string",
            DestinationType::Integer => "integer",
            DestinationType::Number => "number",
            DestinationType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Un campo destino: nombre + tipo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DestinationFieldSpec {
    pub name: String,
    pub kind: DestinationType,
}

impl DestinationFieldSpec {
    pub fn new(name: impl Into<String>, kind: DestinationType) -> Self {
        Self { name: name.into(), kind }
    }
}

impl FromStr for DestinationFieldSpec {
    type Err = DomainError;

    /// Separa por `:`; se usan las dos primeras partes. Nombre o tipo vacíos
    /// son inválidos.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split(':');
        let name = parts.next().unwrap_or_default().trim();
        let kind = parts.next().unwrap_or_default().trim();
        if name.is_empty() || kind.is_empty() {
            return Err(DomainError::InvalidFieldSpec(raw.to_string()));
        }
        Ok(Self::new(name, DestinationType::from_name(kind)))
    }
}

impl fmt::Display for DestinationFieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.kind)
    }
}

/// Parsea una lista de specs preservando el orden. Falla en la primera
/// entrada inválida.
pub fn parse_field_specs<S: AsRef<str>>(raw: &[S]) -> Result<Vec<DestinationFieldSpec>, DomainError> {
    raw.iter().map(|s| s.as_ref().parse()).collect()
}

/// Busca el tipo declarado para una columna.
pub fn lookup<'a>(specs: &'a [DestinationFieldSpec], column: &str) -> Option<&'a DestinationFieldSpec> {
    specs.iter().find(|s| s.name == column)
}
