//! Origen real a través del CLI `bq`, invocado con el mismo gateway de
//! procesos que el CLI destino.
use async_trait::async_trait;
use bridge_core::{ProcessGateway, QueryOptions, RowSource, SchemaSource, SourceError};
use bridge_domain::coercion::raw_row_from_json;
use bridge_domain::{RawRow, TableSchema};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableReference {
    table_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableListing {
    table_reference: TableReference,
}

#[derive(Debug, Clone)]
pub struct BqCliSource<G>
    where G: ProcessGateway
{
    gateway: G,
    executable: PathBuf,
    /// Proyecto por defecto para `show` y `ls`. Vacío usa el del CLI.
    project_id: String,
}

impl<G> BqCliSource<G> where G: ProcessGateway
{
    pub fn new(gateway: G, executable: impl Into<PathBuf>, project_id: impl Into<String>) -> Self {
        Self { gateway,
               executable: executable.into(),
               project_id: project_id.into() }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// `proyecto:dataset`. Un dataset que ya trae proyecto se respeta.
    fn dataset_ref(&self, dataset_id: &str) -> String {
        if self.project_id.is_empty() || dataset_id.contains(':') {
            dataset_id.to_string()
        } else {
            format!("{}:{}", self.project_id, dataset_id)
        }
    }

    async fn run_json(&self, args: Vec<String>) -> Result<Value, SourceError> {
        log::debug!("ejecutando {} {}", self.executable.display(), args.join(" "));
        let out = self.gateway.run(&self.executable, &args).await?;
        let text = out.stdout.trim();
        if text.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        Ok(serde_json::from_str(text)?)
    }

    pub fn show_schema_args(&self, dataset_id: &str, table_id: &str) -> Vec<String> {
        vec!["--format=json".into(),
             "show".into(),
             "--schema".into(),
             format!("{}.{}", self.dataset_ref(dataset_id), table_id)]
    }

    pub fn list_args(&self, dataset_id: &str) -> Vec<String> {
        vec!["--format=json".into(), "ls".into(), self.dataset_ref(dataset_id)]
    }

    pub fn query_args(sql: &str, options: &QueryOptions) -> Vec<String> {
        vec!["--format=json".into(),
             format!("--location={}", options.location),
             "query".into(),
             "--nouse_legacy_sql".into(),
             format!("--max_rows={}", options.max_rows),
             sql.to_string()]
    }
}

#[async_trait]
impl<G> SchemaSource for BqCliSource<G> where G: ProcessGateway
{
    async fn get_table_schema(&self, dataset_id: &str, table_id: &str) -> Result<TableSchema, SourceError> {
        let value = self.run_json(self.show_schema_args(dataset_id, table_id))
                        .await
                        .map_err(|e| SourceError::Fetch(format!("Failed to fetch table schema: {}", e)))?;
        Ok(TableSchema::from_json(value)?)
    }

    async fn list_tables(&self, dataset_id: &str) -> Result<Vec<String>, SourceError> {
        let value = self.run_json(self.list_args(dataset_id)).await?;
        let listing: Vec<TableListing> = serde_json::from_value(value)?;
        Ok(listing.into_iter().map(|t| t.table_reference.table_id).collect())
    }
}

#[async_trait]
impl<G> RowSource for BqCliSource<G> where G: ProcessGateway
{
    async fn query(&self, sql: &str, options: &QueryOptions) -> Result<Vec<RawRow>, SourceError> {
        match self.run_json(Self::query_args(sql, options)).await? {
            Value::Array(rows) => Ok(rows.into_iter().map(raw_row_from_json).collect()),
            other => Err(SourceError::Decode(format!("expected an array of rows, got {}", other))),
        }
    }
}
