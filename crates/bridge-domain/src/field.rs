// field.rs
//! Descriptores de columna del sistema origen (tabla columnar).
//!
//! Un `FieldDescriptor` describe una columna: nombre, tipo primitivo o
//! anidado (`RECORD`), modo de repetición y descripción. El modo y el tipo
//! son ejes independientes: un `RECORD` `REPEATED` es un arreglo de objetos.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Tipo de columna tal como lo reporta el sistema origen.
///
/// Los nombres desconocidos se conservan en `Other` para no perder
/// información; el mapeo los trata como `string`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Integer,
    Int64,
    Float,
    Float64,
    Numeric,
    BigNumeric,
    Boolean,
    Bool,
    Timestamp,
    Datetime,
    Date,
    Time,
    Record,
    Other(String),
}

impl FieldType {
    /// Nombre canónico en mayúsculas (como lo emite el origen).
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "STRING",
            FieldType::Integer => "INTEGER",
            FieldType::Int64 => "INT64",
            FieldType::Float => "FLOAT",
            FieldType::Float64 => "FLOAT64",
            FieldType::Numeric => "NUMERIC",
            FieldType::BigNumeric => "BIGNUMERIC",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Bool => "BOOL",
            FieldType::Timestamp => "TIMESTAMP",
            FieldType::Datetime => "DATETIME",
            FieldType::Date => "DATE",
            FieldType::Time => "TIME",
            FieldType::Record => "RECORD",
            FieldType::Other(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "STRING" => FieldType::String,
            "INTEGER" => FieldType::Integer,
            "INT64" => FieldType::Int64,
            "FLOAT" => FieldType::Float,
            "FLOAT64" => FieldType::Float64,
            "NUMERIC" => FieldType::Numeric,
            "BIGNUMERIC" => FieldType::BigNumeric,
            "BOOLEAN" => FieldType::Boolean,
            "BOOL" => FieldType::Bool,
            "TIMESTAMP" => FieldType::Timestamp,
            "DATETIME" => FieldType::Datetime,
            "DATE" => FieldType::Date,
            "TIME" => FieldType::Time,
            "RECORD" => FieldType::Record,
            _ => FieldType::Other(raw),
        }
    }
}

impl From<&str> for FieldType {
    fn from(raw: &str) -> Self {
        FieldType::from(raw.to_string())
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modo de repetición de una columna. Ausente equivale a `NULLABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldMode {
    Required,
    #[default]
    Nullable,
    Repeated,
}

/// Descriptor de una columna (posiblemente anidada).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub mode: FieldMode,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Sub-campos; sólo tienen sentido cuando `field_type == Record`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>, mode: FieldMode) -> Self {
        Self { name: name.into(),
               field_type: field_type.into(),
               mode,
               description: String::new(),
               fields: Vec::new() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Construye un `RECORD` con los sub-campos dados (en orden).
    pub fn record(name: impl Into<String>, mode: FieldMode, fields: Vec<FieldDescriptor>) -> Self {
        Self { fields,
               ..Self::new(name, FieldType::Record, mode) }
    }

    pub fn is_repeated(&self) -> bool {
        self.mode == FieldMode::Repeated
    }

    pub fn is_required(&self) -> bool {
        self.mode == FieldMode::Required
    }
}

/// Esquema de tabla: secuencia ordenada de descriptores.
///
/// Se serializa como `{ "fields": [...] }`, igual que el metadato del origen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl TableSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Decodifica la salida JSON del origen. Acepta tanto el objeto
    /// `{ "fields": [...] }` como el arreglo plano de campos.
    pub fn from_json(value: serde_json::Value) -> Result<Self, DomainError> {
        if value.is_array() {
            let fields: Vec<FieldDescriptor> = serde_json::from_value(value)?;
            return Ok(Self { fields });
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_type_is_preserved() {
        let t = FieldType::from("GEOGRAPHY");
        assert_eq!(t, FieldType::Other("GEOGRAPHY".into()));
        assert_eq!(t.to_string(), "GEOGRAPHY");
    }

    #[test]
    fn descriptor_defaults_when_mode_and_description_absent() {
        let f: FieldDescriptor = serde_json::from_value(json!({"name": "x", "type": "INT64"})).unwrap();
        assert_eq!(f.mode, FieldMode::Nullable);
        assert_eq!(f.description, "");
        assert!(f.fields.is_empty());
        assert_eq!(f.field_type, FieldType::Int64);
    }

    #[test]
    fn table_schema_accepts_flat_array() {
        let s = TableSchema::from_json(json!([
            {"name": "id", "type": "INTEGER", "mode": "REQUIRED"},
            {"name": "addr", "type": "RECORD", "mode": "REPEATED", "fields": [
                {"name": "city", "type": "STRING"}
            ]}
        ])).unwrap();
        assert_eq!(s.len(), 2);
        assert!(s.fields[0].is_required());
        assert!(s.fields[1].is_repeated());
        assert_eq!(s.fields[1].fields[0].name, "city");
    }

    #[test]
    fn table_schema_rejects_garbage() {
        let err = TableSchema::from_json(json!({"fields": "nope"})).unwrap_err();
        assert!(matches!(err, DomainError::SchemaDecode(_)));
    }
}
