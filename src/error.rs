//! # Errores del Servidor
//! src/error.rs
//!
//! Tres niveles de error:
//!
//! - [`ServerError`]: fatal para todo el proceso (bind, accept loop agotado).
//! - [`ConnectionError`]: fatal solo para una conexión; el worker libera el
//!   cliente y termina, el resto del servidor sigue.
//! - [`DispatchError`]: fallo de sistema dentro de un handler (archivo
//!   demasiado grande o ilegible). Se propaga como `ConnectionError`.
//!
//! Un request mal formado NO es un error: produce una respuesta normal.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errores fatales de arranque o del accept loop
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuración inválida: {0}")]
    InvalidConfig(String),

    #[error("no se pudo escuchar en {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("no se pudo obtener la dirección local: {0}")]
    LocalAddr(#[source] io::Error),

    #[error("accept falló {consecutive} veces seguidas: {source}")]
    AcceptLoop {
        consecutive: u32,
        #[source]
        source: io::Error,
    },
}

/// Errores que terminan una conexión
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("error de lectura: {0}")]
    Read(#[source] io::Error),

    #[error("error de escritura: {0}")]
    Write(#[source] io::Error),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("el cliente ya fue liberado")]
    Released,
}

/// Errores de sistema producidos al atender un request
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("archivo {path:?} demasiado grande ({size} bytes, máximo {max})")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("no se pudo leer {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
