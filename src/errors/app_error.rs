use bridge_core::{ProvisionError, ProvisionStage, SourceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error del origen: {0}")]
    Source(#[from] SourceError),
    #[error("{0}")]
    Provision(#[from] ProvisionError),
}

impl AppError {
    /// Etapa del aprovisionamiento en la que ocurrió, si aplica.
    pub fn stage(&self) -> Option<ProvisionStage> {
        match self {
            AppError::Provision(e) => e.stage(),
            _ => None,
        }
    }
}
