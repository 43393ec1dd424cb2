//! # Keepalive Server - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, inicializa el logging y corre el accept loop.
//! Cualquier error que llegue hasta aquí es fatal.

use keepalive_server::config::Config;
use keepalive_server::server::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::new();

    // RUST_LOG=debug muestra cada request
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_names(true)
        .init();

    info!(
        "keepalive_server v{} (static root: {}, framing: {})",
        env!("CARGO_PKG_VERSION"),
        config.static_root,
        if config.crlf { "CRLF" } else { "LF" }
    );
    if config.allow_path_traversal {
        info!("Sanitización de rutas desactivada: /static/ puede leer fuera de la raíz");
    }

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            error!("Error fatal: {}", e);
            std::process::exit(1);
        }
    };

    let stats = server.stats();
    if let Err(e) = server.run() {
        let snap = stats.snapshot();
        error!(
            "Error fatal: {} (conexiones: {}, requests: {}, uptime: {:?})",
            e,
            snap.connections_accepted,
            snap.requests_served,
            stats.uptime()
        );
        std::process::exit(1);
    }
}
