//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Despacha los bytes de un request al handler correspondiente.
//!
//! ```text
//! bytes → Route::parse → handler → Response
//! ```
//!
//! Un request desconocido o mal formado produce la respuesta fija de
//! "Invalid request"; solo los fallos de sistema (archivo ilegible o
//! demasiado grande) salen como `Err`.

use crate::commands::{self, StaticFiles};
use crate::config::Config;
use crate::error::DispatchError;
use crate::http::{Response, Route};
use tracing::debug;

/// Router sin estado mutable; se comparte entre workers con `Arc`
#[derive(Debug, Clone)]
pub struct Router {
    files: StaticFiles,
}

impl Router {
    pub fn new(files: StaticFiles) -> Self {
        Self { files }
    }

    pub fn from_config(config: &Config) -> Self {
        let files = StaticFiles::new(&config.static_root, config.max_file_size)
            .allow_traversal(config.allow_path_traversal);
        Self::new(files)
    }

    /// Produce la respuesta para un request crudo
    ///
    /// # Ejemplo
    /// ```
    /// use keepalive_server::commands::StaticFiles;
    /// use keepalive_server::router::Router;
    ///
    /// let router = Router::new(StaticFiles::new(".", 1024));
    /// let response = router.dispatch(b"GET /plus/2/3 HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(response.body(), b"Sum of 2 and 3 is 5.\n");
    /// ```
    pub fn dispatch(&self, raw: &[u8]) -> Result<Response, DispatchError> {
        match Route::parse(raw) {
            Route::Plus { lhs, rhs } => {
                debug!("GET /plus/{}/{}", lhs, rhs);
                Ok(commands::plus_handler(lhs, rhs))
            }
            Route::Static(token) => {
                debug!("GET /static/{}", token);
                commands::static_handler(token, &self.files)
            }
            Route::Invalid => {
                debug!("Request inválido ({} bytes)", raw.len());
                Ok(Response::invalid_request())
            }
        }
    }
}
