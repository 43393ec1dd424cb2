//! # Módulo HTTP
//!
//! Protocolo "con forma de HTTP", no HTTP real:
//!
//! - El request es lo que llegó en un solo `read`; solo se clasifica por
//!   prefijo (`GET /plus/...`, `GET /static/...`).
//! - La respuesta es siempre `200` con body de texto plano y
//!   `Connection: Keep-Alive`.
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200\n
//! Content-type: text/plain\n
//! Content-Length: 21\n
//! Connection: Keep-Alive\n
//! \n
//! Sum of 2 and 3 is 5.\n
//! ```

pub mod request;
pub mod response;

pub use request::Route;
pub use response::{LineEnding, Response};
