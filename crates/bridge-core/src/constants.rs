//! Constantes del aprovisionamiento.
//!
//! Agrupa los límites fijos del catálogo destino y los textos con los que se
//! clasifican sus respuestas. Los textos se comparan contra la salida del
//! CLI, por lo que cambiarlos altera la clasificación de fallos.

/// Máximo de filas de muestra que se copian del origen.
pub const SAMPLE_ROW_LIMIT: usize = 100;

/// Rango numérico admitido por el destino para `integer` y `number`.
pub const DESTINATION_MIN: u64 = 0;
pub const DESTINATION_MAX: u64 = 999_999_999;

/// Precisión de despliegue para campos `number`.
pub const NUMBER_PRECISION: u32 = 2;

/// Límite por defecto de una invocación del CLI externo (segundos).
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 120;

/// Prefijos de los archivos temporales de cada corrida.
pub const SCHEMA_FILE_PREFIX: &str = "blind-schema";
pub const DATA_FILE_PREFIX: &str = "blind-data";

pub(crate) const ALREADY_EXISTS_MARKERS: &[&str] = &["already exists", "duplicate"];
pub(crate) const BAD_REQUEST_MARKER: &str = "400 Bad Request";
