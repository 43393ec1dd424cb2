//! # Keepalive Server
//! src/lib.rs
//!
//! Servidor TCP concurrente con respuestas "con forma de HTTP". Cada
//! conexión aceptada se atiende en su propio thread, que mantiene el
//! socket abierto entre requests (keep-alive).
//!
//! ## Arquitectura
//!
//! ```text
//! Server::accept_loop ──accept──> ClientHandle ──spawn──> ConnectionWorker
//!                                                           │
//!                                  loop { read → Router::dispatch → write }
//!                                                           │
//!                                                    release() (una vez)
//! ```
//!
//! - `config`: argumentos CLI / variables de entorno
//! - `error`: errores de servidor, de conexión y de dispatch
//! - `http`: clasificación de requests y formato de respuestas
//! - `router`: despacho de un request a su handler
//! - `commands`: handlers de `/plus` y `/static`
//! - `server`: accept loop, clientes y workers
//! - `metrics`: contadores de conexiones y requests
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use keepalive_server::config::Config;
//! use keepalive_server::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("Error al iniciar servidor");
//! server.run().expect("accept loop terminado");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod router;
pub mod server;
