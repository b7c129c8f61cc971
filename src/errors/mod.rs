//! Errores de la aplicación y su forma serializada.
pub mod app_error;
pub mod payload;

pub use app_error::AppError;
pub use payload::ErrorPayload;
