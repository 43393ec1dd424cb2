//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables
//! de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./keepalive_server --port 8888 \
//!   --static-root ./public \
//!   --max-file-size 1048576
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! SERVER_PORT=9000 SERVER_HOST=127.0.0.1 ./keepalive_server
//! ```

use clap::Parser;

/// Tamaño máximo de un request leído en una sola llamada a `read` (10 MiB)
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 10 * 1024 * 1024;

/// Límite superior aceptado para `max_message_len` (1 GiB)
pub const MAX_MESSAGE_LEN_LIMIT: usize = 1024 * 1024 * 1024;

/// Tamaño máximo de un archivo servido por `/static/` (30 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 30 * 1024 * 1024;

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "keepalive_server")]
#[command(about = "Servidor TCP concurrente con rutas /plus y /static")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8888", env = "SERVER_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha (0.0.0.0 = todas las interfaces)
    #[arg(long, default_value = "0.0.0.0", env = "SERVER_HOST")]
    pub host: String,

    /// Directorio base desde el que se resuelven los archivos de /static/
    #[arg(long = "static-root", default_value = ".", env = "STATIC_ROOT")]
    pub static_root: String,

    /// Bytes máximos leídos por request
    #[arg(long = "max-message-len", default_value_t = DEFAULT_MAX_MESSAGE_LEN, env = "MAX_MESSAGE_LEN")]
    pub max_message_len: usize,

    /// Tamaño máximo (bytes) de un archivo servido
    #[arg(long = "max-file-size", default_value_t = DEFAULT_MAX_FILE_SIZE, env = "MAX_FILE_SIZE")]
    pub max_file_size: u64,

    /// Fallos consecutivos de accept tolerados antes de detener el servidor
    /// (1 = detenerse en el primer fallo)
    #[arg(long = "max-accept-errors", default_value = "16", env = "MAX_ACCEPT_ERRORS")]
    pub max_accept_errors: u32,

    /// Terminar las líneas de headers con \r\n en vez de \n
    #[arg(long, env = "RESPONSE_CRLF")]
    pub crlf: bool,

    /// Servir rutas absolutas o con `..` sin sanitizar (inseguro)
    #[arg(long = "allow-path-traversal", env = "ALLOW_PATH_TRAVERSAL")]
    pub allow_path_traversal: bool,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use keepalive_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8888");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.max_message_len == 0 {
            return Err("Max message length must be >= 1".to_string());
        }
        if self.max_message_len > MAX_MESSAGE_LEN_LIMIT {
            return Err(format!(
                "Max message length must be <= {} bytes",
                MAX_MESSAGE_LEN_LIMIT
            ));
        }
        if self.max_file_size == 0 {
            return Err("Max file size must be >= 1".to_string());
        }
        if self.max_accept_errors == 0 {
            return Err("Max accept errors must be >= 1".to_string());
        }
        if self.static_root.is_empty() {
            return Err("Static root must not be empty".to_string());
        }

        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8888,
            host: "0.0.0.0".to_string(),
            static_root: ".".to_string(),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_accept_errors: 16,
            crlf: false,
            allow_path_traversal: false,
        }
    }
}
