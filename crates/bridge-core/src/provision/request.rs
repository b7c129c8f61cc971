//! Petición de aprovisionamiento y su validación.
use crate::errors::ProvisionError;
use bridge_domain::{parse_field_specs, DestinationFieldSpec, SourceTable};
use serde::{Deserialize, Serialize};

/// Cuerpo tal como llega del cliente. Todo es opcional hasta validar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisioningRequest {
    pub organization: Option<String>,
    pub create_new_dataset: bool,
    pub dataset_name: Option<String>,
    pub dataset_slug: Option<String>,
    pub schema_name: Option<String>,
    pub schema_slug: Option<String>,
    pub fields: Vec<String>,
    pub project_id: Option<String>,
    pub dataset_id: Option<String>,
    pub table_id: Option<String>,
}

/// Petición validada: los campos obligatorios existen y los specs parsean.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub organization: String,
    pub dataset_slug: String,
    /// Presente sólo si se pidió crear el dataset y hay nombre.
    pub dataset_to_create: Option<String>,
    pub schema_name: String,
    pub schema_slug: String,
    pub raw_fields: Vec<String>,
    pub fields: Vec<DestinationFieldSpec>,
    pub source: Option<SourceTable>,
}

const MISSING_FIELDS: &str = "Missing required fields: organization, datasetSlug, schemaName, schemaSlug, fields";

fn present(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl ProvisioningRequest {
    /// Decodifica el cuerpo JSON. Un cuerpo ilegible o con campos del tipo
    /// equivocado es un error de validación.
    pub fn from_json(text: &str) -> Result<Self, ProvisionError> {
        serde_json::from_str(text).map_err(|e| ProvisionError::Validation(format!("Invalid request body: {}", e)))
    }

    pub fn validate(&self) -> Result<ValidatedRequest, ProvisionError> {
        let missing = || ProvisionError::Validation(MISSING_FIELDS.to_string());
        let organization = present(&self.organization).ok_or_else(missing)?;
        let dataset_slug = present(&self.dataset_slug).ok_or_else(missing)?;
        let schema_name = present(&self.schema_name).ok_or_else(missing)?;
        let schema_slug = present(&self.schema_slug).ok_or_else(missing)?;
        if self.fields.is_empty() {
            return Err(missing());
        }
        let fields = parse_field_specs(&self.fields).map_err(|e| ProvisionError::Validation(e.to_string()))?;

        let dataset_to_create = if self.create_new_dataset { present(&self.dataset_name) } else { None };

        let source = match (present(&self.project_id), present(&self.dataset_id), present(&self.table_id)) {
            (Some(p), Some(d), Some(t)) => Some(SourceTable::new(&p, &d, &t)).filter(SourceTable::is_complete),
            _ => None,
        };

        Ok(ValidatedRequest { organization,
                              dataset_slug,
                              dataset_to_create,
                              schema_name,
                              schema_slug,
                              raw_fields: self.fields.clone(),
                              fields,
                              source })
    }
}
