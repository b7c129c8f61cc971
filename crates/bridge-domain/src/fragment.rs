// fragment.rs
//! Nodos del esquema destino (JSON Schema) y el esquema completo de tabla.
//!
//! Un `SchemaFragment` es una variante etiquetada (escalar, string con
//! formato, objeto o arreglo) más su descripción. La serialización sigue el
//! orden de claves que produce el convertidor: `description` y `type` primero
//! en escalares y objetos, y `type`, `items`, `description` en arreglos.
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Tipos primitivos de JSON Schema usados por el mapeo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    String,
    Integer,
    Number,
    Boolean,
}

impl JsonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FragmentKind {
    Scalar(JsonType),
    /// `type: string` con `format` (timestamp, datetime, date, time).
    StringWithFormat(String),
    /// Propiedades en el orden de los sub-campos origen.
    Object(IndexMap<String, SchemaFragment>),
    /// Envuelve exactamente un fragmento.
    Array(Box<SchemaFragment>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaFragment {
    pub description: String,
    pub kind: FragmentKind,
}

impl SchemaFragment {
    pub fn scalar(json_type: JsonType, description: impl Into<String>) -> Self {
        Self { description: description.into(),
               kind: FragmentKind::Scalar(json_type) }
    }

    pub fn formatted(format: impl Into<String>, description: impl Into<String>) -> Self {
        Self { description: description.into(),
               kind: FragmentKind::StringWithFormat(format.into()) }
    }

    pub fn object(properties: IndexMap<String, SchemaFragment>, description: impl Into<String>) -> Self {
        Self { description: description.into(),
               kind: FragmentKind::Object(properties) }
    }

    pub fn array(items: SchemaFragment, description: impl Into<String>) -> Self {
        Self { description: description.into(),
               kind: FragmentKind::Array(Box::new(items)) }
    }

    /// Nombre del `type` JSON Schema del fragmento.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            FragmentKind::Scalar(t) => t.as_str(),
            FragmentKind::StringWithFormat(_) => "string",
            FragmentKind::Object(_) => "object",
            FragmentKind::Array(_) => "array",
        }
    }

    pub fn items(&self) -> Option<&SchemaFragment> {
        match &self.kind {
            FragmentKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn properties(&self) -> Option<&IndexMap<String, SchemaFragment>> {
        match &self.kind {
            FragmentKind::Object(props) => Some(props),
            _ => None,
        }
    }

    pub fn format(&self) -> Option<&str> {
        match &self.kind {
            FragmentKind::StringWithFormat(f) => Some(f),
            _ => None,
        }
    }
}

impl Serialize for SchemaFragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.kind {
            FragmentKind::Array(items) => {
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", items.as_ref())?;
                map.serialize_entry("description", &self.description)?;
            }
            FragmentKind::Scalar(t) => {
                map.serialize_entry("description", &self.description)?;
                map.serialize_entry("type", t.as_str())?;
            }
            FragmentKind::StringWithFormat(format) => {
                map.serialize_entry("description", &self.description)?;
                map.serialize_entry("type", "string")?;
                map.serialize_entry("format", format)?;
            }
            FragmentKind::Object(props) => {
                map.serialize_entry("description", &self.description)?;
                map.serialize_entry("type", "object")?;
                map.serialize_entry("properties", props)?;
            }
        }
        map.end()
    }
}

/// Esquema destino de una tabla completa.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TargetSchema {
    pub title: String,
    pub properties: IndexMap<String, SchemaFragment>,
    /// Nombres con modo `REQUIRED`, en orden de aparición.
    pub required: Vec<String>,
}

impl TargetSchema {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(),
               ..Default::default() }
    }

    pub fn to_value(&self) -> serde_json::Value {
        // La serialización de mapas con claves String no falla.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for TargetSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("type", "object")?;
        map.serialize_entry("title", &self.title)?;
        map.serialize_entry("properties", &self.properties)?;
        map.serialize_entry("required", &self.required)?;
        map.end()
    }
}
