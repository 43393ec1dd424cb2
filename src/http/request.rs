//! # Clasificación de Requests
//! src/http/request.rs
//!
//! No es un parser HTTP completo: el request es lo que llegó en un solo
//! `read`, y solo se mira el prefijo para decidir la ruta.
//!
//! ```text
//! GET /plus/<int>/<int> ...   → Route::Plus
//! GET /static/<token> ...     → Route::Static
//! cualquier otra cosa         → Route::Invalid
//! ```
//!
//! Los números siguen la forma de `%d`: espacios opcionales, signo
//! opcional y dígitos. Lo que venga después del segundo número se ignora.

use regex::bytes::Regex;
use std::sync::OnceLock;

const PLUS_PREFIX: &[u8] = b"GET /plus/";
const STATIC_PREFIX: &[u8] = b"GET /static/";

/// Ruta reconocida en un request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `GET /plus/<lhs>/<rhs>`
    Plus { lhs: i64, rhs: i64 },

    /// `GET /static/<token>`
    Static(&'a str),

    /// Prefijo desconocido o parámetros que no parsean
    Invalid,
}

fn plus_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?-u)^GET /plus/\s*([+-]?\d+)/\s*([+-]?\d+)")
            .expect("plus pattern is valid")
    })
}

fn static_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?-u)^GET /static/\s*(\S+)").expect("static pattern is valid")
    })
}

impl<'a> Route<'a> {
    /// Clasifica los bytes crudos de un request
    ///
    /// Solo mira `raw`; nunca asume un terminador.
    ///
    /// # Ejemplo
    /// ```
    /// use keepalive_server::http::Route;
    ///
    /// let route = Route::parse(b"GET /plus/2/3 HTTP/1.1\r\n\r\n");
    /// assert_eq!(route, Route::Plus { lhs: 2, rhs: 3 });
    /// ```
    pub fn parse(raw: &'a [u8]) -> Route<'a> {
        if raw.starts_with(PLUS_PREFIX) {
            return Self::parse_plus(raw);
        }
        if raw.starts_with(STATIC_PREFIX) {
            return Self::parse_static(raw);
        }
        Route::Invalid
    }

    fn parse_plus(raw: &[u8]) -> Route<'a> {
        let Some(caps) = plus_pattern().captures(raw) else {
            return Route::Invalid;
        };

        match (parse_int(&caps[1]), parse_int(&caps[2])) {
            (Some(lhs), Some(rhs)) => Route::Plus { lhs, rhs },
            // No cabe en i64
            _ => Route::Invalid,
        }
    }

    fn parse_static(raw: &'a [u8]) -> Route<'a> {
        let Some(token) = static_pattern().captures(raw).and_then(|caps| caps.get(1)) else {
            return Route::Invalid;
        };

        match std::str::from_utf8(token.as_bytes()) {
            Ok(token) => Route::Static(token),
            Err(_) => Route::Invalid,
        }
    }
}

fn parse_int(digits: &[u8]) -> Option<i64> {
    std::str::from_utf8(digits).ok()?.parse().ok()
}
