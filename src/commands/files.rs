//! # Comando /static
//! src/commands/files.rs
//!
//! `GET /static/<token>` → contenido del archivo `<static_root>/<token>`.
//!
//! - Archivo inexistente: body `Nonexistent resource\n` (no es error).
//! - Archivo más grande que el máximo, o presente pero ilegible:
//!   [`DispatchError`], que cierra la conexión.
//!
//! Por defecto se rechazan tokens absolutos o con `..`; se responden igual
//! que un archivo inexistente.

use crate::error::DispatchError;
use crate::http::Response;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Ubicación y límites de los archivos servidos
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    max_file_size: u64,
    allow_traversal: bool,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>, max_file_size: u64) -> Self {
        Self {
            root: root.into(),
            max_file_size,
            allow_traversal: false,
        }
    }

    /// Sirve el token tal cual, sin sanitizar (inseguro)
    pub fn allow_traversal(mut self, allow: bool) -> Self {
        self.allow_traversal = allow;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Traduce un token de la URL a una ruta en disco
    ///
    /// Retorna `None` si el token intenta salir de `root`.
    pub fn resolve(&self, token: &str) -> Option<PathBuf> {
        if self.allow_traversal {
            return Some(self.root.join(token));
        }

        let safe = Path::new(token)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        safe.then(|| self.root.join(token))
    }

    /// Lee el archivo completo respetando `max_file_size`
    ///
    /// `Ok(None)` significa que el archivo no existe.
    pub fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, DispatchError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(DispatchError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let too_large = |size| DispatchError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max: self.max_file_size,
        };

        let size = file
            .metadata()
            .map_err(|source| DispatchError::FileRead {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        if size > self.max_file_size {
            return Err(too_large(size));
        }

        // El archivo puede crecer entre metadata() y la lectura
        let mut contents = Vec::with_capacity(size as usize);
        file.take(self.max_file_size + 1)
            .read_to_end(&mut contents)
            .map_err(|source| DispatchError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        if contents.len() as u64 > self.max_file_size {
            return Err(too_large(contents.len() as u64));
        }

        Ok(Some(contents))
    }
}

/// Handler para /static/<token>
pub fn static_handler(token: &str, files: &StaticFiles) -> Result<Response, DispatchError> {
    let Some(path) = files.resolve(token) else {
        warn!("Ruta rechazada fuera de {:?}: {}", files.root(), token);
        return Ok(Response::nonexistent_resource());
    };

    match files.read(&path)? {
        Some(contents) => {
            debug!("Sirviendo {:?} ({} bytes)", path, contents.len());
            Ok(Response::bytes(contents))
        }
        None => {
            debug!("Archivo inexistente: {:?}", path);
            Ok(Response::nonexistent_resource())
        }
    }
}
