// translator.rs
use crate::field::TableSchema;
use crate::fragment::TargetSchema;
use crate::mapper::map_field;

/// Traduce un esquema de tabla completo al esquema destino.
///
/// Recorre los campos en orden; `required` recibe sólo los nombres de nivel
/// superior con modo `REQUIRED` (los anidados no se listan aquí).
pub fn translate(schema: &TableSchema, title: &str) -> TargetSchema {
    let mut target = TargetSchema::new(title);
    for field in &schema.fields {
        target.properties.insert(field.name.clone(), map_field(field));
        if field.is_required() {
            target.required.push(field.name.clone());
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDescriptor, FieldMode};

    #[test]
    fn empty_schema_yields_empty_target() {
        let t = translate(&TableSchema::default(), "empty");
        assert_eq!(t.title, "empty");
        assert!(t.properties.is_empty());
        assert!(t.required.is_empty());
    }

    #[test]
    fn nested_required_is_not_hoisted() {
        let schema = TableSchema::new(vec![FieldDescriptor::record("addr",
                                                                   FieldMode::Nullable,
                                                                   vec![FieldDescriptor::new("zip",
                                                                                             "STRING",
                                                                                             FieldMode::Required)]),]);
        let t = translate(&schema, "t");
        assert!(t.required.is_empty());
    }
}
