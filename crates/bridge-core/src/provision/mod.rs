//! Aprovisionamiento del catálogo destino a través de su CLI.
pub mod commands;
pub mod destination;
pub mod orchestrator;
pub mod outcome;
pub mod request;
pub mod scratch;
pub mod stage;

pub use orchestrator::{ProvisionSettings, Provisioner};
pub use outcome::{ProvisionReport, ProvisionResult, ProvisioningOutcome, SchemaRejection, StatusReport};
pub use request::{ProvisioningRequest, ValidatedRequest};
pub use stage::{ProvisionStage, RunTrace, StepRecord, StepStatus};
