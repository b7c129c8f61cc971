//! JSON Schema que se registra en el catálogo destino.
//!
//! Se construye a partir de los specs planos `nombre:tipo`, no del esquema
//! del origen. Ningún campo se marca como requerido.
use crate::constants::{DESTINATION_MAX, DESTINATION_MIN, NUMBER_PRECISION};
use bridge_domain::{DestinationFieldSpec, DestinationType};
use serde_json::{json, Map, Value};

pub fn property_for(kind: DestinationType) -> Value {
    match kind {
        DestinationType::Integer => json!({
            "type": "integer",
            "minimum": DESTINATION_MIN,
            "maximum": DESTINATION_MAX
        }),
        DestinationType::Number => json!({
            "type": "number",
            "minimum": DESTINATION_MIN,
            "maximum": DESTINATION_MAX,
            "precision": NUMBER_PRECISION
        }),
        DestinationType::Boolean => json!({ "type": "boolean" }),
        DestinationType::String => json!({ "type": "string" }),
    }
}

/// `{type: "object", properties: {...}}` en el orden de los specs. Un nombre
/// repetido conserva su primera posición y el último tipo.
pub fn build_destination_schema(specs: &[DestinationFieldSpec]) -> Value {
    let mut properties = Map::new();
    for spec in specs {
        properties.insert(spec.name.clone(), property_for(spec.kind));
    }
    json!({ "type": "object", "properties": properties })
}
