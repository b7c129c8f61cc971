//! Orquestador de aprovisionamiento.
//!
//! Ejecuta en orden estricto `organization list`, `dataset create` (opcional),
//! `schema create` y `record create`. No hay compensación: un dataset creado
//! sobrevive a un fallo posterior del esquema.
use crate::constants::{DATA_FILE_PREFIX, SAMPLE_ROW_LIMIT, SCHEMA_FILE_PREFIX};
use crate::errors::{GatewayError, ProvisionError};
use crate::gateway::{classify_failure, FailureClass, ProcessGateway, ProcessResult};
use crate::provision::commands::BlindCommand;
use crate::provision::destination::build_destination_schema;
use crate::provision::outcome::{ProvisionReport, ProvisionResult, ProvisioningOutcome, SchemaRejection, StatusReport,
                                MISSING_SOURCE, NO_SOURCE_ROWS};
use crate::provision::request::{ProvisioningRequest, ValidatedRequest};
use crate::provision::scratch::ScratchFile;
use crate::provision::stage::{ProvisionStage, RunTrace, StepStatus};
use crate::source::{sample_query, QueryOptions, RowSource};
use bridge_domain::{coerce_row, DestinationRecord, SourceTable};
use serde_json::Value;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ProvisionSettings {
    /// Ruta del CLI destino.
    pub executable: PathBuf,
    pub scratch_dir: PathBuf,
    /// Filas de muestra a copiar. Nunca supera `SAMPLE_ROW_LIMIT`.
    pub sample_rows: usize,
    pub query_location: String,
}

impl Default for ProvisionSettings {
    fn default() -> Self {
        Self { executable: PathBuf::from("../../blind/blind"),
               scratch_dir: std::env::temp_dir(),
               sample_rows: SAMPLE_ROW_LIMIT,
               query_location: "US".to_string() }
    }
}

#[derive(Debug)]
pub struct Provisioner<G, R>
    where G: ProcessGateway,
          R: RowSource
{
    gateway: G,
    rows: R,
    settings: ProvisionSettings,
}

impl<G, R> Provisioner<G, R>
    where G: ProcessGateway,
          R: RowSource
{
    pub fn new(gateway: G, rows: R, settings: ProvisionSettings) -> Self {
        Self { gateway, rows, settings }
    }

    pub fn settings(&self) -> &ProvisionSettings {
        &self.settings
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn rows(&self) -> &R {
        &self.rows
    }

    fn row_limit(&self) -> usize {
        self.settings.sample_rows.min(SAMPLE_ROW_LIMIT)
    }

    async fn invoke(&self, run_id: Uuid, command: BlindCommand<'_>) -> Result<ProcessResult, GatewayError> {
        let args = command.args();
        log::info!("[{}] ejecutando {} {}", run_id, self.settings.executable.display(), args.join(" "));
        let result = self.gateway.run(&self.settings.executable, &args).await;
        match &result {
            Ok(out) => log::debug!("[{}] stdout: {} stderr: {}", run_id, out.stdout, out.stderr),
            Err(e) => log::debug!("[{}] {}", run_id, e),
        }
        result
    }

    /// Verifica la sesión del CLI destino sin tocar nada más.
    pub async fn check_status(&self) -> StatusReport {
        match self.invoke(Uuid::new_v4(), BlindCommand::OrganizationList).await {
            Ok(out) => StatusReport::authenticated(out.stdout),
            Err(e) => StatusReport::unauthenticated(e.to_string()),
        }
    }

    /// Ejecuta una corrida completa.
    ///
    /// Devuelve `Err` para validación, autenticación y fallos fatales del CLI.
    /// Un 400 al crear el esquema y cualquier problema al importar filas se
    /// reportan dentro de `ProvisionReport`.
    pub async fn provision(&self, request: &ProvisioningRequest) -> Result<ProvisionReport, ProvisionError> {
        let req = request.validate()?;
        let mut trace = RunTrace::new(Uuid::new_v4());
        log::info!("[{}] aprovisionando {}/{}/{} ({} campos)",
                   trace.run_id(),
                   req.organization,
                   req.dataset_slug,
                   req.schema_slug,
                   req.fields.len());

        self.check_auth(&req, &mut trace).await?;
        if let Some(name) = req.dataset_to_create.as_deref() {
            self.create_dataset(&req, name, &mut trace).await?;
        }

        let json_schema = build_destination_schema(&req.fields);
        let result = match self.create_schema(&req, &json_schema, &mut trace).await? {
            None => ProvisionResult::Created(self.import_records(&req, &mut trace).await),
            Some(rejection) => ProvisionResult::SchemaRejected(rejection),
        };
        if result.is_success() {
            trace.advance(ProvisionStage::Done);
        }
        log::info!("[{}] {}", trace.run_id(), result.message());

        Ok(ProvisionReport { success: result.is_success(),
                             message: result.message(),
                             run_id: trace.run_id(),
                             organization: req.organization,
                             dataset: req.dataset_slug,
                             schema: req.schema_slug,
                             fields: req.raw_fields,
                             json_schema,
                             result,
                             trace: trace.into_records() })
    }

    async fn check_auth(&self, req: &ValidatedRequest, trace: &mut RunTrace) -> Result<(), ProvisionError> {
        trace.record(StepStatus::Started, None);
        let listing = match self.invoke(trace.run_id(), BlindCommand::OrganizationList).await {
            Ok(out) => out.stdout,
            Err(e) => {
                log::error!("[{}] autenticación fallida: {}", trace.run_id(), e);
                trace.record(StepStatus::Failed, Some(e.to_string()));
                trace.advance(ProvisionStage::FailedAuth);
                return Err(ProvisionError::Authentication { details: e.to_string() });
            }
        };
        let needle = format!("\"slug\": \"{}\"", req.organization.to_lowercase());
        if !listing.to_lowercase().contains(&needle) {
            log::error!("[{}] organización '{}' no encontrada", trace.run_id(), req.organization);
            trace.record(StepStatus::Failed, Some("organization not found".to_string()));
            trace.advance(ProvisionStage::FailedAuth);
            return Err(ProvisionError::OrganizationNotFound { organization: req.organization.clone(),
                                                              listing });
        }
        trace.record(StepStatus::Succeeded, None);
        Ok(())
    }

    async fn create_dataset(&self, req: &ValidatedRequest, name: &str, trace: &mut RunTrace) -> Result<(), ProvisionError> {
        trace.advance(ProvisionStage::DatasetCreate);
        trace.record(StepStatus::Started, None);
        let error = match self.invoke(trace.run_id(), BlindCommand::dataset_create(req, name)).await {
            Ok(_) => {
                trace.record(StepStatus::Succeeded, None);
                return Ok(());
            }
            Err(e) => e,
        };
        match classify_failure(ProvisionStage::DatasetCreate, &error) {
            FailureClass::AlreadyExists => {
                log::info!("[{}] dataset {} ya existe, se continúa", trace.run_id(), req.dataset_slug);
                trace.record(StepStatus::Absorbed, Some("dataset already exists".to_string()));
                Ok(())
            }
            FailureClass::BadRequest => {
                log::warn!("[{}] 400 al crear dataset {}; puede requerir creación manual",
                           trace.run_id(),
                           req.dataset_slug);
                trace.record(StepStatus::Absorbed, Some(error.to_string()));
                Ok(())
            }
            FailureClass::Fatal => {
                log::error!("[{}] creación de dataset fallida: {}", trace.run_id(), error);
                trace.record(StepStatus::Failed, Some(error.to_string()));
                trace.advance(ProvisionStage::FailedFatal);
                Err(ProvisionError::ExternalTool { stage: ProvisionStage::DatasetCreate,
                                                   source: error })
            }
        }
    }

    /// `Ok(None)` si el esquema se creó, `Ok(Some(_))` ante un 400.
    async fn create_schema(&self,
                           req: &ValidatedRequest,
                           json_schema: &Value,
                           trace: &mut RunTrace)
                           -> Result<Option<SchemaRejection>, ProvisionError> {
        trace.advance(ProvisionStage::SchemaCreate);
        trace.record(StepStatus::Started, None);
        let file = ScratchFile::write_json(&self.settings.scratch_dir, SCHEMA_FILE_PREFIX, json_schema).map_err(|e| {
            trace.advance(ProvisionStage::FailedFatal);
            ProvisionError::Scratch { stage: ProvisionStage::SchemaCreate,
                                      message: e.to_string() }
        })?;
        let path = file.path_arg();
        let result = self.invoke(trace.run_id(), BlindCommand::schema_create(req, &path)).await;
        file.discard();

        let error = match result {
            Ok(_) => {
                trace.record(StepStatus::Succeeded, None);
                return Ok(None);
            }
            Err(e) => e,
        };
        trace.record(StepStatus::Failed, Some(error.to_string()));
        match classify_failure(ProvisionStage::SchemaCreate, &error) {
            FailureClass::BadRequest => {
                log::warn!("[{}] 400 al crear esquema {} en dataset {}",
                           trace.run_id(),
                           req.schema_slug,
                           req.dataset_slug);
                Ok(Some(SchemaRejection::new(&req.dataset_slug, &req.schema_slug)))
            }
            _ => {
                log::error!("[{}] creación de esquema fallida: {}", trace.run_id(), error);
                trace.advance(ProvisionStage::FailedFatal);
                Err(ProvisionError::ExternalTool { stage: ProvisionStage::SchemaCreate,
                                                   source: error })
            }
        }
    }

    /// Nunca falla: cualquier problema queda en `data_import_error`.
    async fn import_records(&self, req: &ValidatedRequest, trace: &mut RunTrace) -> ProvisioningOutcome {
        trace.advance(ProvisionStage::RecordInsert);
        let mut outcome = ProvisioningOutcome { schema_created: true,
                                                ..Default::default() };
        let Some(source) = req.source.as_ref() else {
            log::warn!("[{}] sin datos de conexión del origen, se omite la importación", trace.run_id());
            trace.record(StepStatus::Skipped, Some(MISSING_SOURCE.to_string()));
            outcome.data_import_error = Some(MISSING_SOURCE.to_string());
            return outcome;
        };
        trace.record(StepStatus::Started, Some(source.qualified()));
        match self.insert_records(req, source, trace.run_id()).await {
            Ok(count) => {
                trace.record(StepStatus::Succeeded, Some(format!("{} records", count)));
                outcome.records_imported = count;
            }
            Err(message) => {
                log::warn!("[{}] importación fallida: {}", trace.run_id(), message);
                trace.record(StepStatus::Failed, Some(message.clone()));
                outcome.data_import_error = Some(message);
            }
        }
        outcome
    }

    async fn insert_records(&self, req: &ValidatedRequest, source: &SourceTable, run_id: Uuid) -> Result<usize, String> {
        let limit = self.row_limit();
        let options = QueryOptions { location: self.settings.query_location.clone(),
                                     max_rows: limit };
        let mut rows = self.rows
                           .query(&sample_query(source, limit), &options)
                           .await
                           .map_err(|e| e.to_string())?;
        rows.truncate(limit);
        if rows.is_empty() {
            return Err(NO_SOURCE_ROWS.to_string());
        }
        log::info!("[{}] {} filas obtenidas de {}", run_id, rows.len(), source.qualified());

        let records: Vec<DestinationRecord> = rows.iter().map(|row| coerce_row(row, &req.fields).into()).collect();
        let file = ScratchFile::write_json(&self.settings.scratch_dir, DATA_FILE_PREFIX, &records).map_err(|e| e.to_string())?;
        let path = file.path_arg();
        let result = self.invoke(run_id, BlindCommand::record_create(req, &path)).await;
        file.discard();
        let out = result.map_err(|e| e.to_string())?;
        Ok(inserted_count(&out.stdout).unwrap_or(rows.len()))
    }
}

/// `count` positivo del JSON que imprime `record create`.
pub fn inserted_count(stdout: &str) -> Option<usize> {
    let value: Value = serde_json::from_str(stdout.trim()).ok()?;
    value.get("count")?.as_u64().filter(|c| *c > 0).map(|c| c as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserted_count_falls_back_on_garbage() {
        assert_eq!(inserted_count(r#"{"count": 7}"#), Some(7));
        assert_eq!(inserted_count(r#"{"count": 0}"#), None);
        assert_eq!(inserted_count("created 7 records"), None);
        assert_eq!(inserted_count(r#"{"ids": [1]}"#), None);
    }

    #[test]
    fn row_limit_never_exceeds_bound() {
        struct Never;
        #[async_trait::async_trait]
        impl ProcessGateway for Never {
            async fn run(&self, _: &std::path::Path, _: &[String]) -> Result<ProcessResult, GatewayError> {
                Err(GatewayError::Launch { reason: "unused".into() })
            }
        }
        #[async_trait::async_trait]
        impl RowSource for Never {
            async fn query(&self,
                           _: &str,
                           _: &QueryOptions)
                           -> Result<Vec<bridge_domain::RawRow>, crate::errors::SourceError> {
                Ok(Vec::new())
            }
        }
        let p = Provisioner::new(Never,
                                 Never,
                                 ProvisionSettings { sample_rows: 5000,
                                                     ..Default::default() });
        assert_eq!(p.row_limit(), SAMPLE_ROW_LIMIT);
    }
}
