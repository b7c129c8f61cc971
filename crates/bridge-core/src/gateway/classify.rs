//! Clasificación de fallos del CLI destino según la etapa.
use crate::constants::{ALREADY_EXISTS_MARKERS, BAD_REQUEST_MARKER};
use crate::errors::GatewayError;
use crate::provision::stage::ProvisionStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// El recurso ya existía. Se absorbe y la corrida sigue.
    AlreadyExists,
    /// El destino rechazó la petición con un 400.
    BadRequest,
    Fatal,
}

/// Única fuente de verdad para decidir cómo reaccionar a un fallo.
///
/// Sólo se inspecciona la salida de procesos que terminaron con código de
/// error; lanzamientos fallidos y timeouts son siempre fatales.
pub fn classify_failure(stage: ProvisionStage, error: &GatewayError) -> FailureClass {
    let Some(output) = error.tool_output() else {
        return FailureClass::Fatal;
    };
    match stage {
        ProvisionStage::DatasetCreate => {
            let lowered = output.to_lowercase();
            if ALREADY_EXISTS_MARKERS.iter().any(|m| lowered.contains(m)) {
                FailureClass::AlreadyExists
            } else if output.contains(BAD_REQUEST_MARKER) {
                FailureClass::BadRequest
            } else {
                FailureClass::Fatal
            }
        }
        ProvisionStage::SchemaCreate if output.contains(BAD_REQUEST_MARKER) => FailureClass::BadRequest,
        _ => FailureClass::Fatal,
    }
}
