//! Archivos temporales que se pasan al CLI destino con `--file`.
//!
//! Cada archivo vive exactamente lo que dura la invocación que lo usa. El
//! nombre combina prefijo, milisegundos y un sufijo aleatorio para que
//! corridas concurrentes no colisionen.
use chrono::Utc;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug)]
pub struct ScratchFile {
    inner: NamedTempFile,
}

impl ScratchFile {
    /// Crea el archivo en `dir` y escribe `payload` como JSON indentado.
    pub fn write_json<T: Serialize>(dir: &Path, prefix: &str, payload: &T) -> std::io::Result<Self> {
        let mut inner = tempfile::Builder::new().prefix(&format!("{}-{}-", prefix, Utc::now().timestamp_millis()))
                                                .suffix(".json")
                                                .tempfile_in(dir)?;
        serde_json::to_writer_pretty(inner.as_file_mut(), payload)?;
        inner.as_file_mut().flush()?;
        log::debug!("archivo temporal creado: {}", inner.path().display());
        Ok(Self { inner })
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    pub fn path_arg(&self) -> String {
        self.inner.path().to_string_lossy().into_owned()
    }

    /// Borra el archivo ahora. Un fallo al borrar sólo se reporta; el resto de
    /// salidas queda cubierto por `Drop` de `NamedTempFile`.
    pub fn discard(self) {
        let path: PathBuf = self.inner.path().to_path_buf();
        match self.inner.close() {
            Ok(()) => log::debug!("archivo temporal eliminado: {}", path.display()),
            Err(e) => log::warn!("no se pudo eliminar {}: {}", path.display(), e),
        }
    }
}
