//! # Construcción de Respuestas
//! src/http/response.rs
//!
//! Todas las respuestas tienen la misma forma, con status 200 siempre:
//!
//! ```text
//! HTTP/1.1 200\n
//! Content-type: text/plain\n
//! Content-Length: <bytes del body>\n
//! Connection: Keep-Alive\n
//! \n
//! <body>
//! ```
//!
//! Los headers terminan en `\n` (no `\r\n`) para mantener compatibilidad
//! con los clientes existentes; [`LineEnding::CrLf`] produce el formato
//! estándar.

/// Body para requests que no corresponden a ninguna ruta
pub const INVALID_REQUEST_BODY: &str = "Invalid request.\n\nNot found.\n";

/// Body para `/static/` cuando el archivo no existe
pub const NONEXISTENT_RESOURCE_BODY: &str = "Nonexistent resource\n";

/// Terminador de las líneas de headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n` (formato histórico del servidor)
    #[default]
    Lf,

    /// `\r\n` (HTTP estándar)
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Respuesta de texto plano lista para enviar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta a partir de un body de texto
    pub fn text(body: &str) -> Self {
        Self {
            body: body.as_bytes().to_vec(),
        }
    }

    /// Crea una respuesta a partir de bytes (archivos binarios)
    pub fn bytes(body: Vec<u8>) -> Self {
        Self { body }
    }

    /// Respuesta fija para requests inválidos
    pub fn invalid_request() -> Self {
        Self::text(INVALID_REQUEST_BODY)
    }

    /// Respuesta fija para archivos inexistentes
    pub fn nonexistent_resource() -> Self {
        Self::text(NONEXISTENT_RESOURCE_BODY)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Serializa la respuesta completa (headers + body)
    ///
    /// # Ejemplo
    /// ```
    /// use keepalive_server::http::{LineEnding, Response};
    ///
    /// let bytes = Response::text("hi").to_bytes(LineEnding::Lf);
    /// assert!(bytes.ends_with(b"Content-Length: 2\nConnection: Keep-Alive\n\nhi"));
    /// ```
    pub fn to_bytes(&self, line_ending: LineEnding) -> Vec<u8> {
        let eol = line_ending.as_str();
        let head = format!(
            "HTTP/1.1 200{eol}\
             Content-type: text/plain{eol}\
             Content-Length: {}{eol}\
             Connection: Keep-Alive{eol}\
             {eol}",
            self.body.len()
        );

        let mut result = Vec::with_capacity(head.len() + self.body.len());
        result.extend_from_slice(head.as_bytes());
        result.extend_from_slice(&self.body);
        result
    }
}
