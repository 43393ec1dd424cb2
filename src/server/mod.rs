//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP:
//! 1. `tcp`: escucha en un puerto y acepta conexiones (un solo thread)
//! 2. `client`: el socket de cada conexión, con id único
//! 3. `worker`: el loop read → dispatch → write de cada conexión, en su
//!    propio thread
//!
//! No hay límite de conexiones ni timeouts: un cliente que no envía nada
//! ni cierra mantiene su thread y su socket indefinidamente.

pub mod client;
pub mod tcp;
pub mod worker;

// Re-exportar para facilitar el uso
pub use client::{ClientHandle, ClientId, IdGenerator};
pub use tcp::Server;
pub use worker::{ConnectionWorker, WorkerSettings};
