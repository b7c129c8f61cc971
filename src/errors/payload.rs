use crate::errors::AppError;
use bridge_core::ProvisionStage;
use serde::Serialize;

/// Cuerpo de respuesta para cualquier fallo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<ProvisionStage>,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&AppError> for ErrorPayload {
    fn from(err: &AppError) -> Self {
        let (details, suggestion) = match err {
            AppError::Provision(e) => (e.details(), e.suggestion()),
            _ => (None, None),
        };
        Self { success: false,
               step: err.stage(),
               error: err.to_string(),
               details,
               suggestion }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::{GatewayError, ProvisionError};
    use serde_json::json;

    #[test]
    fn fatal_tool_error_names_step() {
        let err = AppError::from(ProvisionError::ExternalTool { stage: ProvisionStage::DatasetCreate,
                                                               source: GatewayError::ExternalTool { exit_code: 1,
                                                                                                    output: "boom".into() } });
        let payload = serde_json::to_value(ErrorPayload::from(&err)).unwrap();
        assert_eq!(payload["success"], false);
        assert_eq!(payload["step"], "datasetCreate");
        assert_eq!(payload["details"], "command failed with code 1: boom");
        assert_eq!(payload["suggestion"], "Make sure the Blind Proxy is installed and you are logged in");
    }

    #[test]
    fn config_error_has_no_step() {
        let payload = ErrorPayload::from(&AppError::Config("x".into()));
        assert_eq!(serde_json::to_value(payload).unwrap(),
                   json!({"success": false, "error": "Error de configuración: x"}));
    }
}
