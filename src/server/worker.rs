//! # Worker de Conexión
//! src/server/worker.rs
//!
//! Cada conexión aceptada corre en su propio thread con un
//! [`ConnectionWorker`], que es dueño del [`ClientHandle`].
//!
//! ```text
//!               read > 0                dispatch + write ok
//! AwaitingRequest ───────> Processing ─────────────────────┐
//!      ▲  │                    │                           │
//!      │  │ read == 0          │ write / dispatch error    │
//!      │  │ read error         ▼                           │
//!      │  └──────────────> Terminated ──> release()        │
//!      └───────────────────────────────────────────────────┘
//! ```
//!
//! La conexión queda abierta entre requests (keep-alive). Un request
//! inválido produce una respuesta normal; solo los errores de I/O o de
//! lectura de archivos terminan la conexión.

use super::client::ClientHandle;
use crate::config::Config;
use crate::error::ConnectionError;
use crate::http::LineEnding;
use crate::metrics::ServerStats;
use crate::router::Router;
use std::sync::Arc;
use tracing::{debug, info};

/// Parámetros de un worker, copiados desde la configuración
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSettings {
    /// Bytes máximos leídos por request
    pub max_message_len: usize,
    pub line_ending: LineEnding,
}

impl WorkerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_message_len: config.max_message_len,
            line_ending: if config.crlf {
                LineEnding::CrLf
            } else {
                LineEnding::Lf
            },
        }
    }
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Estado del loop de requests
#[derive(Debug)]
enum WorkerState {
    AwaitingRequest,
    /// Buffer del request, del tamaño exacto de lo leído
    Processing { request: Vec<u8> },
    Terminated(Termination),
}

#[derive(Debug)]
enum Termination {
    PeerClosed,
    Failed(ConnectionError),
}

/// Procesa los requests de un cliente hasta que la conexión termina
pub struct ConnectionWorker {
    client: ClientHandle,
    router: Arc<Router>,
    stats: Arc<ServerStats>,
    settings: WorkerSettings,
}

impl ConnectionWorker {
    pub fn new(
        client: ClientHandle,
        router: Arc<Router>,
        stats: Arc<ServerStats>,
        settings: WorkerSettings,
    ) -> Self {
        Self {
            client,
            router,
            stats,
            settings,
        }
    }

    /// Corre el loop de requests y libera el cliente al terminar
    ///
    /// La conexión ya fue contada como abierta por el accept loop; aquí
    /// solo se descuenta al cerrar.
    ///
    /// `Ok(())` si el peer cerró la conexión; `Err` si la terminó un error
    /// de I/O o de lectura de archivo. En ambos casos el socket ya está
    /// cerrado al retornar.
    pub fn run(mut self) -> Result<(), ConnectionError> {
        let mut state = WorkerState::AwaitingRequest;

        let termination = loop {
            state = match state {
                WorkerState::AwaitingRequest => match self.read_request() {
                    Ok(Some(request)) => WorkerState::Processing { request },
                    Ok(None) => WorkerState::Terminated(Termination::PeerClosed),
                    Err(e) => WorkerState::Terminated(Termination::Failed(e)),
                },
                // `request` se libera al terminar este ciclo
                WorkerState::Processing { request } => match self.respond(&request) {
                    Ok(()) => WorkerState::AwaitingRequest,
                    Err(e) => WorkerState::Terminated(Termination::Failed(e)),
                },
                WorkerState::Terminated(termination) => break termination,
            };
        };

        self.client.release();
        let active = self.stats.connection_closed();

        match termination {
            Termination::PeerClosed => {
                info!(
                    "Cliente {} ({}) cerró la conexión [activos: {}]",
                    self.client.id(),
                    self.client.peer_addr(),
                    active
                );
                Ok(())
            }
            Termination::Failed(e) => Err(e),
        }
    }

    /// Lee un request con un solo `read` de hasta `max_message_len` bytes
    ///
    /// El buffer se reserva recién cuando hay datos, así una conexión
    /// ociosa no retiene memoria. `Ok(None)` significa que el peer cerró.
    fn read_request(&mut self) -> Result<Option<Vec<u8>>, ConnectionError> {
        if !self.client.wait_readable()? {
            return Ok(None);
        }

        let mut buffer = vec![0u8; self.settings.max_message_len];
        let len = self.client.read(&mut buffer)?;
        if len == 0 {
            return Ok(None);
        }

        buffer.truncate(len);
        buffer.shrink_to_fit();
        Ok(Some(buffer))
    }

    /// Un ciclo dispatch + write sobre un request ya leído
    fn respond(&mut self, request: &[u8]) -> Result<(), ConnectionError> {
        debug!(
            "Cliente {}: {} bytes\n---\n{}\n---",
            self.client.id(),
            request.len(),
            String::from_utf8_lossy(request)
        );

        let response = self.router.dispatch(request)?;
        let bytes = response.to_bytes(self.settings.line_ending);
        self.client.write_all(&bytes)?;

        self.stats.request_served(request.len(), bytes.len());
        Ok(())
    }
}
