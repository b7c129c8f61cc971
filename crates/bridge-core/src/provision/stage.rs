//! Etapas de una corrida de aprovisionamiento y su traza.
//!
//! Las transiciones válidas son:
//! - `AuthCheck` -> `DatasetCreate` | `SchemaCreate` | `FailedAuth`
//! - `DatasetCreate` -> `SchemaCreate` | `FailedFatal`
//! - `SchemaCreate` -> `RecordInsert` | `Done` | `FailedFatal`
//! - `RecordInsert` -> `Done`
//!
//! La traza es append-only: cada paso deja un registro al iniciar y otro al
//! terminar, de forma análoga a un log de eventos.
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProvisionStage {
    AuthCheck,
    DatasetCreate,
    SchemaCreate,
    RecordInsert,
    Done,
    FailedAuth,
    FailedFatal,
}

impl ProvisionStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProvisionStage::Done | ProvisionStage::FailedAuth | ProvisionStage::FailedFatal)
    }

    /// Indica si `next` es un sucesor permitido.
    pub fn can_advance_to(&self, next: ProvisionStage) -> bool {
        use ProvisionStage::*;
        matches!((self, next),
                 (AuthCheck, DatasetCreate | SchemaCreate | FailedAuth)
                 | (DatasetCreate, SchemaCreate | FailedFatal)
                 | (SchemaCreate, RecordInsert | Done | FailedFatal)
                 | (RecordInsert, Done))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProvisionStage::AuthCheck => "authCheck",
            ProvisionStage::DatasetCreate => "datasetCreate",
            ProvisionStage::SchemaCreate => "schemaCreate",
            ProvisionStage::RecordInsert => "recordInsert",
            ProvisionStage::Done => "done",
            ProvisionStage::FailedAuth => "failedAuth",
            ProvisionStage::FailedFatal => "failedFatal",
        }
    }
}

impl fmt::Display for ProvisionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resultado de un paso dentro de la traza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepStatus {
    Started,
    Succeeded,
    /// El paso falló de forma conocida y la corrida continuó.
    Absorbed,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub stage: ProvisionStage,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub ts: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RunTrace {
    run_id: Uuid,
    current: ProvisionStage,
    records: Vec<StepRecord>,
}

impl RunTrace {
    pub fn new(run_id: Uuid) -> Self {
        Self { run_id,
               current: ProvisionStage::AuthCheck,
               records: Vec::new() }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn current(&self) -> ProvisionStage {
        self.current
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StepRecord> {
        self.records
    }

    /// Avanza a `next`. Transiciones no permitidas se ignoran y se reportan
    /// en el log (la traza nunca retrocede).
    pub fn advance(&mut self, next: ProvisionStage) {
        if self.current == next {
            return;
        }
        if !self.current.can_advance_to(next) {
            log::warn!("[{}] transición inválida {} -> {}", self.run_id, self.current, next);
            return;
        }
        self.current = next;
    }

    pub fn record(&mut self, status: StepStatus, note: Option<String>) {
        log::debug!("[{}] {} {:?} {}", self.run_id, self.current, status, note.as_deref().unwrap_or(""));
        self.records.push(StepRecord { stage: self.current,
                                       status,
                                       note,
                                       ts: Utc::now() });
    }

    pub fn stages_with(&self, status: StepStatus) -> Vec<ProvisionStage> {
        self.records.iter().filter(|r| r.status == status).map(|r| r.stage).collect()
    }
}
