//! # Cliente Conectado
//! src/server/client.rs
//!
//! Un [`ClientHandle`] es dueño exclusivo del socket de una conexión, de la
//! dirección del peer y de un id único. El socket se cierra exactamente una
//! vez: en [`ClientHandle::release`] o, si nadie la llamó, en `Drop`.

use crate::error::ConnectionError;
use std::fmt;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Identificador único de una conexión dentro del proceso
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(u64);

impl ClientId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generador de ids estrictamente crecientes, empezando en 1
///
/// Es seguro llamarlo desde varios threads a la vez.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> ClientId {
        ClientId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Socket + dirección + id de un cliente aceptado
#[derive(Debug)]
pub struct ClientHandle {
    id: ClientId,
    peer_addr: SocketAddr,
    stream: Option<TcpStream>,
}

impl ClientHandle {
    /// Toma posesión del socket y asigna el siguiente id
    pub fn new(stream: TcpStream, peer_addr: SocketAddr, ids: &IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            peer_addr,
            stream: Some(stream),
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub fn is_released(&self) -> bool {
        self.stream.is_none()
    }

    /// Bloquea hasta que haya datos o el peer cierre, sin consumir nada
    ///
    /// `Ok(false)` significa que el peer cerró.
    pub fn wait_readable(&mut self) -> Result<bool, ConnectionError> {
        let stream = self.stream.as_mut().ok_or(ConnectionError::Released)?;
        let mut peeked = [0u8; 1];
        let n = stream.peek(&mut peeked).map_err(ConnectionError::Read)?;
        Ok(n > 0)
    }

    /// Un `read` sobre el socket; `Ok(0)` significa que el peer cerró
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, ConnectionError> {
        let stream = self.stream.as_mut().ok_or(ConnectionError::Released)?;
        stream.read(buf).map_err(ConnectionError::Read)
    }

    /// Escribe todos los bytes en el socket
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), ConnectionError> {
        let stream = self.stream.as_mut().ok_or(ConnectionError::Released)?;
        stream.write_all(bytes).map_err(ConnectionError::Write)?;
        stream.flush().map_err(ConnectionError::Write)
    }

    /// Cierra el socket si sigue abierto
    ///
    /// Llamarla más de una vez no hace nada. Retorna `true` solo en la
    /// llamada que efectivamente cerró el socket.
    pub fn release(&mut self) -> bool {
        match self.stream.take() {
            Some(stream) => {
                drop(stream);
                debug!("Cliente {} ({}) liberado", self.id, self.peer_addr);
                true
            }
            None => false,
        }
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        self.release();
    }
}
