// identifiers.rs
//! Normalización de identificadores del origen (proyecto, dataset, tabla).
use serde::{Deserialize, Serialize};

/// Recorta espacios y, si el identificador viene calificado con puntos
/// (`proyecto.dataset`), conserva sólo el último segmento.
pub fn clean_identifier(raw: &str) -> String {
    raw.rsplit('.').next().unwrap_or(raw).trim().to_string()
}

/// Tabla origen totalmente calificada.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTable {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

impl SourceTable {
    /// Construye la referencia normalizando dataset y tabla.
    pub fn new(project_id: &str, dataset_id: &str, table_id: &str) -> Self {
        Self { project_id: project_id.trim().to_string(),
               dataset_id: clean_identifier(dataset_id),
               table_id: clean_identifier(table_id) }
    }

    /// `proyecto.dataset.tabla`
    pub fn qualified(&self) -> String {
        format!("{}.{}.{}", self.project_id, self.dataset_id, self.table_id)
    }

    /// Ninguna parte vacía.
    pub fn is_complete(&self) -> bool {
        !(self.project_id.is_empty() || self.dataset_id.is_empty() || self.table_id.is_empty())
    }
}
