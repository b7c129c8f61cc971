//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y construye `AppConfig`.
use crate::errors::AppError;
use bridge_core::constants::{DEFAULT_TOOL_TIMEOUT_SECS, SAMPLE_ROW_LIMIT};
use bridge_core::ProvisionSettings;
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// De dónde se leen esquemas y filas del origen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Fixture,
    Live,
}

impl FromStr for SourceMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixture" | "mock" => Ok(SourceMode::Fixture),
            "live" | "bq" => Ok(SourceMode::Live),
            other => Err(AppError::Config(format!("SCHEMA_SOURCE desconocido: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub blind_cli_path: PathBuf,
    pub blind_cli_timeout: Duration,
    pub bq_cli_path: PathBuf,
    pub bq_location: String,
    pub source_mode: SourceMode,
    /// Proyecto usado por `show`/`ls` cuando el origen es real.
    pub default_project_id: Option<String>,
    pub sample_rows: usize,
    pub temp_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { blind_cli_path: PathBuf::from("../../blind/blind"),
               blind_cli_timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
               bq_cli_path: PathBuf::from("bq"),
               bq_location: "US".to_string(),
               source_mode: SourceMode::Fixture,
               default_project_id: None,
               sample_rows: SAMPLE_ROW_LIMIT,
               temp_dir: env::temp_dir() }
    }
}

fn parse_number<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim()
                    .parse()
                    .map_err(|_| AppError::Config(format!("{} no es un número válido: '{}'", key, v))),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda.
    /// Valores vacíos cuentan como ausentes.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout_secs = parse_number("BLIND_CLI_TIMEOUT_SECS", get("BLIND_CLI_TIMEOUT_SECS"), DEFAULT_TOOL_TIMEOUT_SECS)?;
        let sample_rows = parse_number("PROVISION_SAMPLE_ROWS", get("PROVISION_SAMPLE_ROWS"), SAMPLE_ROW_LIMIT)?;
        if sample_rows > SAMPLE_ROW_LIMIT {
            return Err(AppError::Config(format!("PROVISION_SAMPLE_ROWS no puede superar {}", SAMPLE_ROW_LIMIT)));
        }
        let source_mode = match get("SCHEMA_SOURCE") {
            Some(v) => v.parse()?,
            None => defaults.source_mode,
        };

        Ok(Self { blind_cli_path: get("BLIND_CLI_PATH").map(PathBuf::from).unwrap_or(defaults.blind_cli_path),
                  blind_cli_timeout: Duration::from_secs(timeout_secs),
                  bq_cli_path: get("BQ_CLI_PATH").map(PathBuf::from).unwrap_or(defaults.bq_cli_path),
                  bq_location: get("BQ_LOCATION").unwrap_or(defaults.bq_location),
                  source_mode,
                  default_project_id: get("GOOGLE_CLOUD_PROJECT_ID"),
                  sample_rows,
                  temp_dir: get("PROVISION_TEMP_DIR").map(PathBuf::from).unwrap_or(defaults.temp_dir) })
    }

    pub fn provision_settings(&self) -> ProvisionSettings {
        ProvisionSettings { executable: self.blind_cli_path.clone(),
                            scratch_dir: self.temp_dir.clone(),
                            sample_rows: self.sample_rows,
                            query_location: self.bq_location.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.blind_cli_path, PathBuf::from("../../blind/blind"));
        assert_eq!(cfg.blind_cli_timeout, Duration::from_secs(120));
        assert_eq!(cfg.bq_location, "US");
        assert_eq!(cfg.source_mode, SourceMode::Fixture);
        assert_eq!(cfg.sample_rows, 100);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = AppConfig::from_lookup(lookup(&[("BLIND_CLI_PATH", "/usr/local/bin/blind"),
                                                  ("BLIND_CLI_TIMEOUT_SECS", "30"),
                                                  ("SCHEMA_SOURCE", "live"),
                                                  ("GOOGLE_CLOUD_PROJECT_ID", "proj"),
                                                  ("PROVISION_SAMPLE_ROWS", "10"),
                                                  ("BQ_LOCATION", "EU")])).unwrap();
        assert_eq!(cfg.source_mode, SourceMode::Live);
        assert_eq!(cfg.default_project_id.as_deref(), Some("proj"));
        let settings = cfg.provision_settings();
        assert_eq!(settings.executable, PathBuf::from("/usr/local/bin/blind"));
        assert_eq!(settings.sample_rows, 10);
        assert_eq!(settings.query_location, "EU");
    }

    #[test]
    fn malformed_numbers_are_config_errors() {
        let err = AppConfig::from_lookup(lookup(&[("BLIND_CLI_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("BLIND_CLI_TIMEOUT_SECS")));
        assert!(AppConfig::from_lookup(lookup(&[("PROVISION_SAMPLE_ROWS", "500")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("SCHEMA_SOURCE", "s3")])).is_err());
    }
}
