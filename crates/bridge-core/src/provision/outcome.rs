//! Resultados que devuelve una corrida.
use crate::provision::stage::StepRecord;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const MISSING_SOURCE: &str = "Missing BigQuery connection info (projectId, datasetId, or tableId)";
pub const NO_SOURCE_ROWS: &str = "No data found in BigQuery table";

/// Estado acumulado a lo largo de los pasos de una corrida exitosa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningOutcome {
    pub schema_created: bool,
    pub records_imported: usize,
    pub data_import_error: Option<String>,
}

impl ProvisioningOutcome {
    pub fn message(&self) -> String {
        if self.records_imported > 0 {
            format!("Blind schema created successfully and {} records imported", self.records_imported)
        } else if let Some(e) = &self.data_import_error {
            format!("Blind schema created successfully but data import failed: {}", e)
        } else {
            "Blind schema created successfully (no data import attempted)".to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Troubleshooting {
    pub step1: String,
    pub step2: String,
    pub step3: String,
    pub step4: String,
}

/// Rechazo 400 al crear el esquema. No es un error: se reporta con pasos de
/// diagnóstico.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaRejection {
    pub error: String,
    pub suggestion: String,
    pub troubleshooting: Troubleshooting,
    #[serde(skip)]
    pub dataset: String,
    #[serde(skip)]
    pub schema: String,
}

impl SchemaRejection {
    pub fn new(dataset: &str, schema: &str) -> Self {
        Self { error: "Blind API returned 400 Bad Request".to_string(),
               suggestion: "Try creating the dataset manually in Blind Insight first, or use a different schema name."
                   .to_string(),
               troubleshooting: Troubleshooting {
                   step1: format!("Check if dataset '{}' exists in Blind Insight", dataset),
                   step2: format!("Try a different schema name (current: '{}')", schema),
                   step3: "Verify your Blind Insight permissions".to_string(),
                   step4: "Check Blind API status".to_string(),
               },
               dataset: dataset.to_string(),
               schema: schema.to_string() }
    }

    pub fn message(&self) -> String {
        format!("Schema creation failed due to Blind API 400 error. Please check if dataset '{}' exists and schema '{}' is unique.",
                self.dataset, self.schema)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProvisionResult {
    Created(ProvisioningOutcome),
    SchemaRejected(SchemaRejection),
}

impl ProvisionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ProvisionResult::Created(_))
    }

    pub fn message(&self) -> String {
        match self {
            ProvisionResult::Created(o) => o.message(),
            ProvisionResult::SchemaRejected(r) => r.message(),
        }
    }
}

/// Respuesta completa de una corrida que llegó a intentar el esquema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionReport {
    pub success: bool,
    pub message: String,
    pub run_id: Uuid,
    pub organization: String,
    pub dataset: String,
    pub schema: String,
    pub fields: Vec<String>,
    pub json_schema: Value,
    #[serde(flatten)]
    pub result: ProvisionResult,
    pub trace: Vec<StepRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub suggestion: String,
}

impl StatusReport {
    pub fn authenticated(listing: String) -> Self {
        Self { authenticated: true,
               organizations: Some(listing),
               error: None,
               suggestion: "Use one of the organization slugs shown above".to_string() }
    }

    pub fn unauthenticated(error: String) -> Self {
        Self { authenticated: false,
               organizations: None,
               error: Some(error),
               suggestion: "Please run: ./blind login".to_string() }
    }
}
