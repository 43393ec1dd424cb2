//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Contadores atómicos; ningún worker bloquea a otro al actualizarlos.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Contadores thread-safe del servidor
#[derive(Debug)]
pub struct ServerStats {
    connections_accepted: AtomicU64,
    active_connections: AtomicU64,
    requests_served: AtomicU64,
    bytes_read: AtomicU64,
    bytes_written: AtomicU64,
    start_time: Instant,
}

/// Copia de los contadores en un instante
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub connections_accepted: u64,
    pub active_connections: u64,
    pub requests_served: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            connections_accepted: AtomicU64::new(0),
            active_connections: AtomicU64::new(0),
            requests_served: AtomicU64::new(0),
            bytes_read: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    /// Retorna las conexiones que siguen activas después de cerrar esta
    pub fn connection_closed(&self) -> u64 {
        let previous = self
            .active_connections
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                Some(n.saturating_sub(1))
            })
            .unwrap_or(0);
        previous.saturating_sub(1)
    }

    pub fn request_served(&self, bytes_in: usize, bytes_out: usize) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes_in as u64, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes_out as u64, Ordering::Relaxed);
    }

    pub fn active_connections(&self) -> u64 {
        self.active_connections.load(Ordering::Relaxed)
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            connections_accepted: self.connections_accepted.load(Ordering::Relaxed),
            active_connections: self.active_connections.load(Ordering::Relaxed),
            requests_served: self.requests_served.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}
