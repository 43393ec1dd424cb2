//! # Comandos del Servidor
//!
//! Handlers de las dos rutas que el servidor entiende.
//!
//! - **plus**: suma de dos enteros (`/plus/<a>/<b>`)
//! - **files**: archivos estáticos (`/static/<token>`)

pub mod files;
pub mod plus;

// Re-exportar funciones útiles
pub use files::{static_handler, StaticFiles};
pub use plus::plus_handler;
