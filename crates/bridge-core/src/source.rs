//! Contratos hacia el almacén origen.
use crate::errors::SourceError;
use async_trait::async_trait;
use bridge_domain::{RawRow, SourceTable, TableSchema};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub location: String,
    pub max_rows: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { location: "US".to_string(),
               max_rows: crate::constants::SAMPLE_ROW_LIMIT }
    }
}

/// Lectura de metadatos de tablas.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    async fn get_table_schema(&self, dataset_id: &str, table_id: &str) -> Result<TableSchema, SourceError>;
    async fn list_tables(&self, dataset_id: &str) -> Result<Vec<String>, SourceError>;
}

/// Ejecución de consultas de muestra.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn query(&self, sql: &str, options: &QueryOptions) -> Result<Vec<RawRow>, SourceError>;
}

#[async_trait]
impl<T: SchemaSource + ?Sized> SchemaSource for Arc<T> {
    async fn get_table_schema(&self, dataset_id: &str, table_id: &str) -> Result<TableSchema, SourceError> {
        (**self).get_table_schema(dataset_id, table_id).await
    }

    async fn list_tables(&self, dataset_id: &str) -> Result<Vec<String>, SourceError> {
        (**self).list_tables(dataset_id).await
    }
}

#[async_trait]
impl<T: RowSource + ?Sized> RowSource for Arc<T> {
    async fn query(&self, sql: &str, options: &QueryOptions) -> Result<Vec<RawRow>, SourceError> {
        (**self).query(sql, options).await
    }
}

/// Consulta de muestra sobre la tabla completa calificada.
pub fn sample_query(table: &SourceTable, limit: usize) -> String {
    format!("SELECT * FROM `{}` LIMIT {}", table.qualified(), limit)
}
