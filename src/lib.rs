//! schema-bridge
//!
//! Librería de la aplicación:
//! - `config` carga la configuración desde el entorno (.env).
//! - `errors` define `AppError` y el payload JSON de error.
//! - `service` arma los colaboradores y expone las operaciones.
//! - `cli` define los argumentos del binario.

pub mod cli;
pub mod config;
pub mod errors;
pub mod service;

pub use config::{AppConfig, SourceMode};
pub use errors::{AppError, ErrorPayload};
pub use service::{BridgeService, SchemaReport, TableListing};
