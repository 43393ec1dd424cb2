//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Contadores globales del servidor, compartidos por todos los workers:
//! - Conexiones aceptadas y activas
//! - Requests atendidos
//! - Bytes leídos y escritos

pub mod collector;

pub use collector::{ServerStats, StatsSnapshot};
