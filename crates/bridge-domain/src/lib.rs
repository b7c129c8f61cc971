// bridge-domain library entry point
//! Modelo puro de traducción: descriptores de columna del origen, fragmentos
//! JSON Schema del destino, el mapeo entre ambos y la coerción de filas.
pub mod coercion;
pub mod error;
pub mod field;
pub mod field_spec;
pub mod fragment;
pub mod identifiers;
pub mod mapper;
pub mod translator;

pub use coercion::{coerce_row, coerce_value, CoercedRow, DestinationRecord, RawRow, RawValue, TypedValue};
pub use error::DomainError;
pub use field::{FieldDescriptor, FieldMode, FieldType, TableSchema};
pub use field_spec::{parse_field_specs, DestinationFieldSpec, DestinationType};
pub use fragment::{FragmentKind, JsonType, SchemaFragment, TargetSchema};
pub use identifiers::{clean_identifier, SourceTable};
pub use mapper::map_field;
pub use translator::translate;
