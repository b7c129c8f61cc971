//! Frontera con los CLIs externos.
//!
//! El core sólo conoce este trait; la implementación con procesos reales
//! vive en `bridge-adapters`. Los tests usan fakes que graban los argumentos.
pub mod classify;

use crate::errors::GatewayError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub use classify::{classify_failure, FailureClass};

/// Salida de un proceso que terminó con éxito.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessResult {
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self { exit_code: 0,
               stdout: stdout.into(),
               stderr: String::new() }
    }
}

#[async_trait]
pub trait ProcessGateway: Send + Sync {
    /// Ejecuta `program` con `args` sin pasar por un shell.
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessResult, GatewayError>;
}

#[async_trait]
impl<T: ProcessGateway + ?Sized> ProcessGateway for Arc<T> {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessResult, GatewayError> {
        (**self).run(program, args).await
    }
}
