// mapper.rs
//! Mapeo de un descriptor de columna a un fragmento de esquema destino.
//!
//! La resolución del tipo base y la repetición son ejes independientes: se
//! resuelve primero el fragmento base (recursivo para `RECORD`) y luego, si el
//! modo es `REPEATED`, se envuelve una sola vez en un arreglo.
use indexmap::IndexMap;

use crate::field::{FieldDescriptor, FieldType};
use crate::fragment::{JsonType, SchemaFragment};

/// Mapea un campo (y sus sub-campos) a su fragmento JSON Schema. Total: los
/// tipos desconocidos caen en `string`.
pub fn map_field(field: &FieldDescriptor) -> SchemaFragment {
    let base = map_base(field);
    if field.is_repeated() {
        SchemaFragment::array(base, field.description.clone())
    } else {
        base
    }
}

/// Fragmento del campo ignorando su modo.
pub fn map_base(field: &FieldDescriptor) -> SchemaFragment {
    let description = field.description.clone();
    match &field.field_type {
        FieldType::String => SchemaFragment::scalar(JsonType::String, description),
        FieldType::Integer | FieldType::Int64 => SchemaFragment::scalar(JsonType::Integer, description),
        FieldType::Float | FieldType::Float64 | FieldType::Numeric | FieldType::BigNumeric => {
            SchemaFragment::scalar(JsonType::Number, description)
        }
        FieldType::Boolean | FieldType::Bool => SchemaFragment::scalar(JsonType::Boolean, description),
        t @ (FieldType::Timestamp | FieldType::Datetime | FieldType::Date | FieldType::Time) => {
            SchemaFragment::formatted(t.as_str().to_lowercase(), description)
        }
        FieldType::Record => {
            let properties: IndexMap<String, SchemaFragment> =
                field.fields.iter().map(|sub| (sub.name.clone(), map_field(sub))).collect();
            SchemaFragment::object(properties, description)
        }
        FieldType::Other(_) => SchemaFragment::scalar(JsonType::String, description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldMode;
    use crate::fragment::FragmentKind;

    #[test]
    fn scalar_aliases_collapse() {
        for (t, expected) in [("INTEGER", "integer"),
                              ("INT64", "integer"),
                              ("FLOAT", "number"),
                              ("FLOAT64", "number"),
                              ("NUMERIC", "number"),
                              ("BIGNUMERIC", "number"),
                              ("BOOLEAN", "boolean"),
                              ("BOOL", "boolean"),
                              ("STRING", "string"),
                              ("BYTES", "string")]
        {
            let f = FieldDescriptor::new("x", t, FieldMode::Nullable);
            assert_eq!(map_field(&f).type_name(), expected, "type {t}");
        }
    }

    #[test]
    fn temporal_types_use_lowercase_format() {
        for t in ["TIMESTAMP", "DATETIME", "DATE", "TIME"] {
            let f = FieldDescriptor::new("x", t, FieldMode::Required);
            let frag = map_field(&f);
            assert_eq!(frag.format(), Some(t.to_lowercase().as_str()));
        }
    }

    #[test]
    fn repeated_record_is_array_of_objects() {
        let f = FieldDescriptor::record("items",
                                        FieldMode::Repeated,
                                        vec![FieldDescriptor::new("sku", "STRING", FieldMode::Required),
                                             FieldDescriptor::new("qty", "INTEGER", FieldMode::Nullable),])
            .with_description("line items");
        let frag = map_field(&f);
        assert_eq!(frag.description, "line items");
        let items = frag.items().expect("array");
        assert_eq!(items.description, "line items");
        match &items.kind {
            FragmentKind::Object(props) => {
                assert_eq!(props.keys().collect::<Vec<_>>(), vec!["sku", "qty"]);
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn record_without_subfields_is_empty_object() {
        let f = FieldDescriptor::new("meta", "RECORD", FieldMode::Nullable);
        let frag = map_field(&f);
        assert!(frag.properties().unwrap().is_empty());
    }
}
