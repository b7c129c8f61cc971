use bridge_domain::{map_field, translate, FieldDescriptor, FieldMode, FragmentKind, SchemaFragment, TableSchema};
use serde_json::json;

fn sample_fields() -> Vec<FieldDescriptor> {
    vec![FieldDescriptor::new("id", "INTEGER", FieldMode::Required),
         FieldDescriptor::new("name", "STRING", FieldMode::Nullable),
         FieldDescriptor::new("tags", "STRING", FieldMode::Repeated),]
}

fn strip_descriptions(v: &mut serde_json::Value) {
    match v {
        serde_json::Value::Object(map) => {
            map.remove("description");
            for (_, child) in map.iter_mut() {
                strip_descriptions(child);
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(strip_descriptions),
        _ => {}
    }
}

#[test]
fn three_field_table_translates_to_expected_schema() {
    let target = translate(&TableSchema::new(sample_fields()), "users");
    let mut props = serde_json::to_value(&target.properties).unwrap();
    strip_descriptions(&mut props);
    assert_eq!(props,
               json!({
                   "id": {"type": "integer"},
                   "name": {"type": "string"},
                   "tags": {"type": "array", "items": {"type": "string"}}
               }));
    assert_eq!(target.required, vec!["id".to_string()]);
}

#[test]
fn repeated_items_equal_unrepeated_fragment() {
    let nested = FieldDescriptor::record("addr",
                                         FieldMode::Repeated,
                                         vec![FieldDescriptor::new("city", "STRING", FieldMode::Nullable),
                                              FieldDescriptor::new("tags", "STRING", FieldMode::Repeated),])
        .with_description("addresses");
    let mut fields = sample_fields();
    fields.push(nested);
    fields.push(FieldDescriptor::new("seen_at", "TIMESTAMP", FieldMode::Repeated));
    fields.push(FieldDescriptor::new("blob", "GEOGRAPHY", FieldMode::Repeated));

    for field in fields.iter().filter(|f| f.is_repeated()) {
        let mut single = field.clone();
        single.mode = FieldMode::Nullable;
        let expected = map_field(&single);
        let wrapped = map_field(field);
        assert_eq!(wrapped.type_name(), "array", "{}", field.name);
        assert_eq!(wrapped.items(), Some(&expected), "{}", field.name);
        assert_eq!(wrapped.description, field.description);
    }
}

fn assert_keys_follow_source(field: &FieldDescriptor, fragment: &SchemaFragment) {
    let fragment = fragment.items().unwrap_or(fragment);
    if let FragmentKind::Object(props) = &fragment.kind {
        let names: Vec<&str> = field.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(props.keys().map(String::as_str).collect::<Vec<_>>(), names);
        for sub in &field.fields {
            assert_keys_follow_source(sub, &props[&sub.name]);
        }
    }
}

#[test]
fn record_keys_follow_source_order_recursively() {
    let deep = FieldDescriptor::record("outer",
                                       FieldMode::Nullable,
                                       vec![FieldDescriptor::new("z", "STRING", FieldMode::Nullable),
                                            FieldDescriptor::record("inner",
                                                                    FieldMode::Repeated,
                                                                    vec![FieldDescriptor::new("b", "BOOL", FieldMode::Nullable),
                                                                         FieldDescriptor::new("a", "FLOAT64", FieldMode::Required),]),
                                            FieldDescriptor::new("m", "DATE", FieldMode::Nullable),]);
    let fragment = map_field(&deep);
    assert_keys_follow_source(&deep, &fragment);
}

#[test]
fn required_lists_exactly_required_names() {
    let fields = vec![FieldDescriptor::new("a", "STRING", FieldMode::Required),
                      FieldDescriptor::new("b", "STRING", FieldMode::Repeated),
                      FieldDescriptor::new("c", "STRING", FieldMode::Nullable),
                      FieldDescriptor::record("d",
                                              FieldMode::Required,
                                              vec![FieldDescriptor::new("b", "STRING", FieldMode::Required)]),];
    let target = translate(&TableSchema::new(fields), "t");
    assert_eq!(target.required, vec!["a".to_string(), "d".to_string()]);
    assert_eq!(target.properties.keys().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
}

#[test]
fn source_json_round_trips_into_target_json() {
    let source = json!({
        "fields": [
            {"name": "id", "type": "INTEGER", "mode": "REQUIRED", "description": "Unique identifier"},
            {"name": "created_at", "type": "TIMESTAMP", "mode": "REQUIRED", "description": "Record creation timestamp"},
            {"name": "tags", "type": "STRING", "mode": "REPEATED", "description": "User tags"}
        ]
    });
    let schema = TableSchema::from_json(source).unwrap();
    let target = translate(&schema, "users").to_value();
    assert_eq!(target,
               json!({
                   "type": "object",
                   "title": "users",
                   "properties": {
                       "id": {"description": "Unique identifier", "type": "integer"},
                       "created_at": {"description": "Record creation timestamp", "type": "string", "format": "timestamp"},
                       "tags": {
                           "type": "array",
                           "items": {"description": "User tags", "type": "string"},
                           "description": "User tags"
                       }
                   },
                   "required": ["id", "created_at"]
               }));
}
