//! Contadores de Diagnóstico
//!
//! Só leitura/escrita atômica (lock-free); nunca influenciam a decodificação
//! ou a saída de nenhuma mensagem.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Default)]
pub struct Stats {
    received: AtomicU64,
    decoded: AtomicU64,
    failed: AtomicU64,
}

/// Cópia pontual dos contadores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub received: u64,
    pub decoded: u64,
    pub failed: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_decoded(&self) {
        self.decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            decoded: self.decoded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Um tick do ticker: loga e devolve os contadores, ou `None` enquanto
/// nenhuma mensagem chegou.
pub fn tick(stats: &Stats) -> Option<StatsSnapshot> {
    let s = stats.snapshot();
    if s.received == 0 {
        return None;
    }
    info!(received = s.received, decoded = s.decoded, failed = s.failed, "mensagens recebidas");
    Some(s)
}

/// Task que chama `tick` a cada `every`.
pub fn spawn_ticker(stats: Arc<Stats>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // primeiro tick é imediato
        interval.tick().await;
        loop {
            interval.tick().await;
            tick(&stats);
        }
    })
}
