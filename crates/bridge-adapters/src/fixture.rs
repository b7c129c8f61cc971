//! Origen de prueba sin credenciales: un esquema `users` fijo y filas
//! configurables.
use async_trait::async_trait;
use bridge_core::{QueryOptions, RowSource, SchemaSource, SourceError};
use bridge_domain::{FieldDescriptor, FieldMode, RawRow, TableSchema};

pub const FIXTURE_TABLES: [&str; 4] = ["users", "orders", "products", "analytics"];

pub fn users_schema() -> TableSchema {
    TableSchema::new(vec![FieldDescriptor::new("id", "INTEGER", FieldMode::Required).with_description("Unique identifier"),
                          FieldDescriptor::new("name", "STRING", FieldMode::Nullable).with_description("User name"),
                          FieldDescriptor::new("email", "STRING", FieldMode::Required)
                              .with_description("User email address"),
                          FieldDescriptor::new("created_at", "TIMESTAMP", FieldMode::Required)
                              .with_description("Record creation timestamp"),
                          FieldDescriptor::new("tags", "STRING", FieldMode::Repeated).with_description("User tags"),])
}

/// Devuelve el mismo esquema para cualquier tabla.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    rows: Vec<RawRow>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl SchemaSource for FixtureSource {
    async fn get_table_schema(&self, _dataset_id: &str, _table_id: &str) -> Result<TableSchema, SourceError> {
        Ok(users_schema())
    }

    async fn list_tables(&self, _dataset_id: &str) -> Result<Vec<String>, SourceError> {
        Ok(FIXTURE_TABLES.iter().map(|t| t.to_string()).collect())
    }
}

#[async_trait]
impl RowSource for FixtureSource {
    async fn query(&self, _sql: &str, options: &QueryOptions) -> Result<Vec<RawRow>, SourceError> {
        Ok(self.rows.iter().take(options.max_rows).cloned().collect())
    }
}
