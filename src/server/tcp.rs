//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! El [`Server`] es dueño del socket que escucha. Su accept loop corre en
//! un solo thread: por cada conexión crea un [`ClientHandle`] y lo entrega
//! a un thread nuevo sin esperar a que termine.

use super::client::{ClientHandle, IdGenerator};
use super::worker::{ConnectionWorker, WorkerSettings};
use crate::config::Config;
use crate::error::ServerError;
use crate::metrics::ServerStats;
use crate::router::Router;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};

/// Servidor con un thread por conexión
pub struct Server {
    listener: TcpListener,
    ids: IdGenerator,
    router: Arc<Router>,
    stats: Arc<ServerStats>,
    settings: WorkerSettings,
    max_accept_errors: u32,
}

impl Server {
    /// Valida la configuración y abre el socket de escucha
    ///
    /// Un fallo aquí es fatal: el servidor no llega a atender a nadie.
    pub fn bind(config: Config) -> Result<Self, ServerError> {
        Self::with_id_generator(config, IdGenerator::new())
    }

    /// Igual que [`Server::bind`] pero con un generador de ids provisto
    pub fn with_id_generator(config: Config, ids: IdGenerator) -> Result<Self, ServerError> {
        config.validate().map_err(ServerError::InvalidConfig)?;

        let address = config.address();
        info!("Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            addr: address.clone(),
            source,
        })?;
        info!("Servidor escuchando en {}", address);

        Ok(Self {
            listener,
            ids,
            router: Arc::new(Router::from_config(&config)),
            stats: Arc::new(ServerStats::new()),
            settings: WorkerSettings::from_config(&config),
            max_accept_errors: config.max_accept_errors,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener.local_addr().map_err(ServerError::LocalAddr)
    }

    pub fn stats(&self) -> Arc<ServerStats> {
        Arc::clone(&self.stats)
    }

    /// Acepta conexiones para siempre, llamando `on_accept` una vez por cada
    /// una
    ///
    /// `on_accept` debe retornar rápido: el siguiente `accept` no ocurre
    /// hasta que retorna. Los fallos de `accept` se registran y se reintenta;
    /// solo `max_accept_errors` fallos consecutivos terminan el loop.
    pub fn accept_loop<F>(&self, mut on_accept: F) -> Result<(), ServerError>
    where
        F: FnMut(ClientHandle),
    {
        let mut consecutive_errors = 0;

        loop {
            match self.listener.accept() {
                Ok((stream, peer_addr)) => {
                    consecutive_errors = 0;
                    let client = ClientHandle::new(stream, peer_addr, &self.ids);
                    self.stats.connection_opened();
                    info!("Nueva conexión desde {} (cliente {})", peer_addr, client.id());
                    on_accept(client);
                }
                Err(source) => {
                    consecutive_errors += 1;
                    if consecutive_errors >= self.max_accept_errors {
                        error!(
                            "accept falló {} veces seguidas, deteniendo el servidor: {}",
                            consecutive_errors, source
                        );
                        return Err(ServerError::AcceptLoop {
                            consecutive: consecutive_errors,
                            source,
                        });
                    }
                    warn!(
                        "Error al aceptar conexión ({}/{}): {}",
                        consecutive_errors, self.max_accept_errors, source
                    );
                }
            }
        }
    }

    /// Corre el servidor: un thread por conexión
    pub fn run(&self) -> Result<(), ServerError> {
        info!("Modo concurrente: un thread por conexión");
        self.accept_loop(|client| self.spawn_worker(client))
    }

    /// Entrega el cliente a un thread nuevo sin esperar su resultado
    fn spawn_worker(&self, client: ClientHandle) {
        let id = client.id();
        let worker = ConnectionWorker::new(
            client,
            Arc::clone(&self.router),
            Arc::clone(&self.stats),
            self.settings,
        );

        let spawned = thread::Builder::new()
            .name(format!("client-{}", id))
            .spawn(move || {
                if let Err(e) = worker.run() {
                    error!("Cliente {} terminado por error: {}", id, e);
                }
            });

        // Si falla, el closure (y con él el socket) ya se liberó
        if let Err(e) = spawned {
            self.stats.connection_closed();
            error!("No se pudo crear el thread del cliente {}: {}", id, e);
        }
    }
}
