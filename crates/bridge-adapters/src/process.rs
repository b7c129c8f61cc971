//! Gateway de procesos reales sobre `tokio::process`.
use async_trait::async_trait;
use bridge_core::constants::DEFAULT_TOOL_TIMEOUT_SECS;
use bridge_core::{GatewayError, ProcessGateway, ProcessResult};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Ejecuta el programa directamente (sin shell), con stdin cerrado y un
/// límite de tiempo de pared. Al vencer el límite el hijo se mata.
#[derive(Debug, Clone)]
pub struct TokioProcessGateway {
    timeout: Duration,
}

impl Default for TokioProcessGateway {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS))
    }
}

impl TokioProcessGateway {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ProcessGateway for TokioProcessGateway {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessResult, GatewayError> {
        let child = Command::new(program).args(args)
                                         .stdin(Stdio::null())
                                         .stdout(Stdio::piped())
                                         .stderr(Stdio::piped())
                                         .kill_on_drop(true)
                                         .spawn()
                                         .map_err(|e| GatewayError::Launch { reason: e.to_string() })?;

        // Si vence el plazo, el future se descarta y kill_on_drop mata al hijo.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| GatewayError::Launch { reason: e.to_string() })?,
            Err(_) => {
                let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                log::warn!("{} excedió {}ms, proceso terminado", program.display(), millis);
                return Err(GatewayError::Timeout { millis });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let code = output.status.code().unwrap_or(-1);
        log::debug!("{} terminó con código {}", program.display(), code);

        if output.status.success() {
            Ok(ProcessResult { exit_code: code,
                               stdout,
                               stderr })
        } else {
            let output = if stderr.is_empty() { stdout } else { stderr };
            Err(GatewayError::ExternalTool { exit_code: code, output })
        }
    }
}
