//! Fachada de la aplicación: arma los colaboradores según la configuración y
//! produce las respuestas JSON de cada operación.
use crate::config::{AppConfig, SourceMode};
use crate::errors::AppError;
use bridge_adapters::{BqCliSource, FixtureSource, TokioProcessGateway};
use bridge_core::{ProcessGateway, ProvisionReport, ProvisionSettings, Provisioner, ProvisioningRequest, RowSource, SchemaSource,
                  StatusReport};
use bridge_domain::{translate, SourceTable, TableSchema};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Esquema del origen junto a su traducción.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReport {
    pub table_name: String,
    pub dataset: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project: String,
    pub source_schema: TableSchema,
    pub json_schema: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableListing {
    pub dataset: String,
    pub tables: Vec<String>,
}

pub struct BridgeService {
    schemas: Arc<dyn SchemaSource>,
    provisioner: Provisioner<Arc<dyn ProcessGateway>, Arc<dyn RowSource>>,
    default_project: Option<String>,
}

impl BridgeService {
    pub fn new(schemas: Arc<dyn SchemaSource>,
               rows: Arc<dyn RowSource>,
               gateway: Arc<dyn ProcessGateway>,
               settings: ProvisionSettings,
               default_project: Option<String>)
               -> Self {
        Self { schemas,
               provisioner: Provisioner::new(gateway, rows, settings),
               default_project }
    }

    /// Origen fixture o `bq` real; ambos CLIs comparten el gateway.
    pub fn from_config(config: &AppConfig) -> Self {
        let gateway: Arc<dyn ProcessGateway> = Arc::new(TokioProcessGateway::new(config.blind_cli_timeout));
        let (schemas, rows): (Arc<dyn SchemaSource>, Arc<dyn RowSource>) = match config.source_mode {
            SourceMode::Fixture => {
                let fixture = Arc::new(FixtureSource::new());
                (fixture.clone() as Arc<dyn SchemaSource>, fixture as Arc<dyn RowSource>)
            }
            SourceMode::Live => {
                let project = config.default_project_id.clone().unwrap_or_default();
                let live = Arc::new(BqCliSource::new(gateway.clone(), config.bq_cli_path.clone(), project));
                (live.clone() as Arc<dyn SchemaSource>, live as Arc<dyn RowSource>)
            }
        };
        log::info!("origen configurado: {:?}", config.source_mode);
        Self::new(schemas,
                  rows,
                  gateway,
                  config.provision_settings(),
                  config.default_project_id.clone())
    }

    pub async fn describe_table(&self, project: Option<&str>, dataset_id: &str, table_id: &str) -> Result<SchemaReport, AppError> {
        let explicit = project.map(str::trim).filter(|p| !p.is_empty());
        let project = explicit.or(self.default_project.as_deref()).unwrap_or_default();
        let table = SourceTable::new(project, dataset_id, table_id);
        let dataset_ref = match explicit {
            Some(p) => format!("{}:{}", p, table.dataset_id),
            None => table.dataset_id.clone(),
        };
        log::info!("leyendo esquema de {}", table.qualified());
        let schema = self.schemas.get_table_schema(&dataset_ref, &table.table_id).await?;
        let json_schema = translate(&schema, &table.table_id).to_value();
        Ok(SchemaReport { table_name: table.table_id,
                          dataset: table.dataset_id,
                          project: table.project_id,
                          source_schema: schema,
                          json_schema })
    }

    pub async fn list_tables(&self, dataset_id: &str) -> Result<TableListing, AppError> {
        let dataset = bridge_domain::clean_identifier(dataset_id);
        let tables = self.schemas.list_tables(&dataset).await?;
        Ok(TableListing { dataset, tables })
    }

    pub async fn provision(&self, request: &ProvisioningRequest) -> Result<ProvisionReport, AppError> {
        Ok(self.provisioner.provision(request).await?)
    }

    pub async fn check_status(&self) -> StatusReport {
        self.provisioner.check_status().await
    }
}
