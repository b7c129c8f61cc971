//! Errores del core: invocación de procesos, lectura del origen y
//! aprovisionamiento.

use crate::provision::stage::ProvisionStage;
use thiserror::Error;

/// Fallo al ejecutar un CLI externo.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// El proceso terminó con código distinto de cero. `output` es stderr si
    /// no está vacío, en otro caso stdout.
    #[error("command failed with code {exit_code}: {output}")]
    ExternalTool { exit_code: i32, output: String },
    #[error("failed to launch command: {reason}")] Launch { reason: String },
    #[error("command timed out after {millis}ms")] Timeout { millis: u64 },
}

impl GatewayError {
    /// Texto de la salida del CLI, sólo para fallos con código de salida.
    pub fn tool_output(&self) -> Option<&str> {
        match self {
            GatewayError::ExternalTool { output, .. } => Some(output.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("source fetch failed: {0}")] Fetch(String),
    #[error("source response could not be decoded: {0}")] Decode(String),
}

impl From<GatewayError> for SourceError {
    fn from(e: GatewayError) -> Self {
        SourceError::Fetch(e.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Decode(e.to_string())
    }
}

impl From<bridge_domain::DomainError> for SourceError {
    fn from(e: bridge_domain::DomainError) -> Self {
        SourceError::Decode(e.to_string())
    }
}

/// Falla que detiene una corrida de aprovisionamiento.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("{0}")] Validation(String),
    #[error("Blind authentication failed. Please ensure you are logged in.")]
    Authentication { details: String },
    #[error("Organization '{organization}' not found or no access. Available organizations: {listing}")]
    OrganizationNotFound { organization: String, listing: String },
    #[error("{stage} failed: {source}")]
    ExternalTool {
        stage: ProvisionStage,
        #[source]
        source: GatewayError,
    },
    #[error("{stage} scratch file error: {message}")]
    Scratch { stage: ProvisionStage, message: String },
}

impl ProvisionError {
    /// Etapa en la que se detuvo la corrida. La validación ocurre antes de
    /// la primera etapa, así que no tiene.
    pub fn stage(&self) -> Option<ProvisionStage> {
        match self {
            ProvisionError::Validation(_) => None,
            ProvisionError::Authentication { .. } | ProvisionError::OrganizationNotFound { .. } => {
                Some(ProvisionStage::FailedAuth)
            }
            ProvisionError::ExternalTool { stage, .. } | ProvisionError::Scratch { stage, .. } => Some(*stage),
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            ProvisionError::Authentication { .. } => Some("Run: ./blind login".to_string()),
            ProvisionError::OrganizationNotFound { .. } => {
                Some("Please check your organization slug or ensure you have access to it.".to_string())
            }
            ProvisionError::ExternalTool { .. } | ProvisionError::Scratch { .. } => {
                Some("Make sure the Blind Proxy is installed and you are logged in".to_string())
            }
            ProvisionError::Validation(_) => None,
        }
    }

    pub fn details(&self) -> Option<String> {
        match self {
            ProvisionError::Authentication { details } => Some(details.clone()),
            ProvisionError::ExternalTool { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}
