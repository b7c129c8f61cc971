// bridge-core library entry point
//! Motor de aprovisionamiento: frontera con procesos externos, contratos del
//! origen y la secuencia autenticar, crear dataset, crear esquema e insertar.
pub mod constants;
pub mod errors;
pub mod gateway;
pub mod provision;
pub mod source;

pub use errors::{GatewayError, ProvisionError, SourceError};
pub use gateway::{classify_failure, FailureClass, ProcessGateway, ProcessResult};
pub use provision::{ProvisionReport, ProvisionResult, ProvisionSettings, ProvisionStage, Provisioner, ProvisioningOutcome,
                    ProvisioningRequest, SchemaRejection, StatusReport, StepStatus};
pub use source::{sample_query, QueryOptions, RowSource, SchemaSource};
