// coercion.rs
//! Coerción de filas origen a registros tipados del destino.
//!
//! La coerción es total: cada fila produce exactamente un registro y cada
//! valor se convierte o cae en el valor cero del tipo declarado (0, 0.0,
//! false o cadena vacía). Nunca retorna error.
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::field_spec::{lookup, DestinationFieldSpec, DestinationType};

/// Valor crudo tal como llega del origen.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    /// Valor envuelto en un objeto con clave `value` (tipos especiales del
    /// cliente origen).
    Boxed(Box<RawValue>),
    /// Objetos o arreglos sin forma reconocible.
    Json(Value),
}

impl RawValue {
    pub fn boxed(inner: RawValue) -> Self {
        RawValue::Boxed(Box::new(inner))
    }

    /// Quita todas las capas `Boxed`.
    pub fn unwrap_boxed(&self) -> &RawValue {
        let mut current = self;
        while let RawValue::Boxed(inner) = current {
            current = inner.as_ref();
        }
        current
    }

    pub fn is_null(&self) -> bool {
        matches!(self.unwrap_boxed(), RawValue::Null)
    }
}

impl From<Value> for RawValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Int(i),
                None => RawValue::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => RawValue::Text(s),
            Value::Object(mut map) => match map.remove("value") {
                Some(inner) => RawValue::boxed(RawValue::from(inner)),
                None => RawValue::Json(Value::Object(map)),
            },
            other @ Value::Array(_) => RawValue::Json(other),
        }
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(ts: DateTime<Utc>) -> Self {
        RawValue::Timestamp(ts)
    }
}

/// Fila cruda: columnas en el orden del origen.
pub type RawRow = IndexMap<String, RawValue>;

/// Convierte un objeto JSON de fila en `RawRow`. Valores no-objeto producen
/// una fila vacía.
pub fn raw_row_from_json(v: Value) -> RawRow {
    match v {
        Value::Object(map) => map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect(),
        _ => RawRow::new(),
    }
}

/// Valor ya convertido al tipo destino.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Integer(i64),
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl TypedValue {
    pub fn zero(kind: DestinationType) -> Self {
        match kind {
            DestinationType::Integer => TypedValue::Integer(0),
            DestinationType::Number => TypedValue::Number(0.0),
            DestinationType::Boolean => TypedValue::Boolean(false),
            DestinationType::String => TypedValue::Text(String::new()),
        }
    }

    pub fn kind(&self) -> DestinationType {
        match self {
            TypedValue::Integer(_) => DestinationType::Integer,
            TypedValue::Number(_) => DestinationType::Number,
            TypedValue::Boolean(_) => DestinationType::Boolean,
            TypedValue::Text(_) => DestinationType::String,
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypedValue::Integer(i) => serializer.serialize_i64(*i),
            TypedValue::Number(n) => serializer.serialize_f64(*n),
            TypedValue::Boolean(b) => serializer.serialize_bool(*b),
            TypedValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

pub type CoercedRow = IndexMap<String, TypedValue>;

/// Registro en la convención del destino: `{ "data": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationRecord {
    pub data: CoercedRow,
}

impl From<CoercedRow> for DestinationRecord {
    fn from(data: CoercedRow) -> Self {
        Self { data }
    }
}

/// Coerciona una fila completa.
///
/// Las columnas de la fila se emiten en su orden; las que no tienen spec se
/// convierten a texto. Los campos declarados que faltan en la fila se
/// agregan al final con su valor cero.
pub fn coerce_row(row: &RawRow, specs: &[DestinationFieldSpec]) -> CoercedRow {
    let mut out = CoercedRow::with_capacity(row.len().max(specs.len()));
    for (column, raw) in row {
        let kind = lookup(specs, column).map(|s| s.kind).unwrap_or(DestinationType::String);
        out.insert(column.clone(), coerce_value(raw, kind));
    }
    for spec in specs {
        if !out.contains_key(&spec.name) {
            out.insert(spec.name.clone(), TypedValue::zero(spec.kind));
        }
    }
    out
}

/// Coerciona un valor al tipo destino dado.
pub fn coerce_value(raw: &RawValue, kind: DestinationType) -> TypedValue {
    let value = raw.unwrap_boxed();
    if matches!(value, RawValue::Null) {
        return TypedValue::zero(kind);
    }
    match kind {
        DestinationType::Integer => TypedValue::Integer(parse_int_prefix(&stringify(value)).unwrap_or(0)),
        DestinationType::Number => TypedValue::Number(parse_float_prefix(&stringify(value)).unwrap_or(0.0)),
        DestinationType::Boolean => TypedValue::Boolean(truthy(value)),
        DestinationType::String => TypedValue::Text(stringify(value)),
    }
}

/// Representación textual de un valor (ya desenvuelto).
pub fn stringify(value: &RawValue) -> String {
    match value.unwrap_boxed() {
        RawValue::Null => String::new(),
        RawValue::Bool(b) => b.to_string(),
        RawValue::Int(i) => i.to_string(),
        RawValue::Float(f) => f.to_string(),
        RawValue::Text(s) => s.clone(),
        RawValue::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::Millis, true),
        RawValue::Json(v) => v.to_string(),
        RawValue::Boxed(_) => String::new(),
    }
}

/// Veracidad de un valor. El texto `"false"` / `"0"` cuenta como falso
/// porque el origen en modo CLI entrega booleanos como texto.
pub fn truthy(value: &RawValue) -> bool {
    match value.unwrap_boxed() {
        RawValue::Null => false,
        RawValue::Bool(b) => *b,
        RawValue::Int(i) => *i != 0,
        RawValue::Float(f) => *f != 0.0 && !f.is_nan(),
        RawValue::Text(s) => {
            let t = s.trim();
            !(t.is_empty() || t.eq_ignore_ascii_case("false") || t == "0")
        }
        RawValue::Timestamp(_) | RawValue::Json(_) => true,
        RawValue::Boxed(_) => false,
    }
}

/// Entero base 10 del prefijo más largo válido (`" 42abc"` → 42,
/// `"3.9"` → 3). `None` si no hay dígitos o hay desbordamiento.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let t = text.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    t[..end].parse().ok()
}

/// Flotante del prefijo más largo válido (`"2.5kg"` → 2.5, `"1e3"` →
/// 1000). Resultados no finitos se descartan.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let t = text.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    // Exponente sólo si trae al menos un dígito.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    t[..end].parse::<f64>().ok().filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn int_prefix_semantics() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("  -7 apples"), Some(-7));
        assert_eq!(parse_int_prefix("3.99"), Some(3));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix(""), None);
    }

    #[test]
    fn float_prefix_semantics() {
        assert_eq!(parse_float_prefix("2.5kg"), Some(2.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("7e"), Some(7.0));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("true"), None);
    }

    #[test]
    fn boxed_object_is_detected_from_json() {
        let raw = RawValue::from(json!({"value": "123"}));
        assert_eq!(raw, RawValue::boxed(RawValue::Text("123".into())));
        assert_eq!(coerce_value(&raw, DestinationType::Integer), TypedValue::Integer(123));
    }

    #[test]
    fn shapeless_object_is_json_text() {
        let raw = RawValue::from(json!({"lat": 1, "lng": 2}));
        assert_eq!(coerce_value(&raw, DestinationType::String), TypedValue::Text(r#"{"lat":1,"lng":2}"#.into()));
    }

    #[test]
    fn timestamp_renders_iso8601() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(coerce_value(&RawValue::from(ts), DestinationType::String),
                   TypedValue::Text("2024-03-01T12:30:00.000Z".into()));
    }

    #[test]
    fn text_booleans() {
        assert!(!truthy(&RawValue::Text("false".into())));
        assert!(!truthy(&RawValue::Text("".into())));
        assert!(truthy(&RawValue::Text("yes".into())));
        assert!(truthy(&RawValue::Int(-1)));
        assert!(!truthy(&RawValue::Float(f64::NAN)));
    }

    #[test]
    fn typed_values_serialize_bare() {
        let rec = DestinationRecord::from(CoercedRow::from_iter([("a".to_string(), TypedValue::Integer(1)),
                                                                  ("b".to_string(), TypedValue::Text("x".into()))]));
        assert_eq!(serde_json::to_value(&rec).unwrap(), json!({"data": {"a": 1, "b": "x"}}));
    }
}
