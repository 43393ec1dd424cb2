//! # Comando /plus
//! src/commands/plus.rs
//!
//! `GET /plus/<a>/<b>` → `Sum of <a> and <b> is <a+b>.\n`

use crate::http::Response;

/// Handler para /plus/<lhs>/<rhs>
///
/// Los operandos son `i64`; la suma se calcula en `i128`, así que nunca
/// desborda.
///
/// # Ejemplo
/// ```
/// use keepalive_server::commands::plus_handler;
///
/// let response = plus_handler(2, 3);
/// assert_eq!(response.body(), b"Sum of 2 and 3 is 5.\n");
/// ```
pub fn plus_handler(lhs: i64, rhs: i64) -> Response {
    let sum = i128::from(lhs) + i128::from(rhs);
    Response::text(&format!("Sum of {} and {} is {}.\n", lhs, rhs, sum))
}
