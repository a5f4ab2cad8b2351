//! Loop de Recepção (PULL)
//!
//! Dois estados: LISTENING (aguardando `recv`) e PROCESSING (decodificar +
//! imprimir), sempre voltando para LISTENING. Sem timeout, sem retry, sem ack.

use crate::decode::decode_request;
use crate::report::{write_failure, write_request};
use crate::stats::{Stats, StatsSnapshot};
use crate::types::now_ns;
use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use zeromq::{PullSocket, Socket, SocketRecv, ZmqError};

#[derive(Error, Debug)]
pub enum ReceiverError {
    #[error("falha no bind em {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: ZmqError,
    },

    #[error("falha ao receber do socket: {0}")]
    Transport(#[from] ZmqError),

    #[error("falha ao escrever no console: {0}")]
    Console(#[from] io::Error),
}

/// Resultado do processamento de um frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Decoded,
    DecodeFailed,
}

/// Socket PULL com bind feito.
///
/// O socket pertence ao receiver e é fechado quando `run` termina, por
/// qualquer caminho.
pub struct Receiver {
    socket: PullSocket,
    endpoint: String,
    stats: Arc<Stats>,
}

/// Troca o curinga `*` de `tcp://*:PORTA` por `0.0.0.0`.
pub fn normalize_endpoint(addr: &str) -> String {
    match addr.strip_prefix("tcp://*:") {
        Some(port) => format!("tcp://0.0.0.0:{}", port),
        None => addr.to_string(),
    }
}

impl Receiver {
    /// Abre o socket PULL e faz bind em `addr`.
    ///
    /// # Argumentos
    /// * `addr` - Endpoint ZMQ (ex: `tcp://*:5555`; porta 0 escolhe uma porta livre)
    ///
    /// # Retorno
    /// Receiver pronto para `run`; o endpoint resolvido fica em `endpoint()`
    pub async fn bind(addr: &str) -> Result<Self, ReceiverError> {
        let mut socket = PullSocket::new();
        let resolved = socket
            .bind(&normalize_endpoint(addr))
            .await
            .map_err(|source| ReceiverError::Bind {
                addr: addr.to_string(),
                source,
            })?;

        Ok(Self {
            socket,
            endpoint: resolved.to_string(),
            stats: Arc::new(Stats::new()),
        })
    }

    /// Endpoint efetivamente em uso (com a porta resolvida).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn stats(&self) -> Arc<Stats> {
        Arc::clone(&self.stats)
    }

    /// Loop principal.
    ///
    /// Roda indefinidamente; termina somente quando `shutdown` completa ou em
    /// erro de transporte/console. Falha de decodificação não interrompe o loop.
    ///
    /// # Argumentos
    /// * `out` - Destino das linhas de console (stdout no binário)
    /// * `shutdown` - Futuro de cancelamento; `std::future::pending()` para nunca parar
    ///
    /// # Retorno
    /// Contadores finais
    pub async fn run<W, F>(mut self, mut out: W, shutdown: F) -> Result<StatsSnapshot, ReceiverError>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        info!(endpoint = %self.endpoint, "receiver escutando");

        let result = self.listen(&mut out, shutdown).await;

        for err in self.socket.close().await {
            warn!(error = %err, "erro ao fechar socket");
        }

        let snapshot = self.stats.snapshot();
        info!(
            received = snapshot.received,
            decoded = snapshot.decoded,
            failed = snapshot.failed,
            "receiver finalizado"
        );
        result.map(|_| snapshot)
    }

    async fn listen<W, F>(&mut self, out: &mut W, shutdown: F) -> Result<(), ReceiverError>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            // LISTENING
            let message = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("shutdown solicitado");
                    return Ok(());
                }
                received = self.socket.recv() => received?,
            };

            // PROCESSING: cada frame de uma mensagem multipart é uma mensagem
            for frame in message.into_vec() {
                self.stats.record_received();
                match handle_frame(&frame, out)? {
                    Outcome::Decoded => self.stats.record_decoded(),
                    Outcome::DecodeFailed => self.stats.record_failed(),
                }
            }
        }
    }
}

/// Decodifica um frame e imprime o resultado.
///
/// Não guarda nada entre chamadas: o frame N não afeta o frame N+1.
pub fn handle_frame<W: Write>(frame: &[u8], out: &mut W) -> io::Result<Outcome> {
    match decode_request(frame) {
        Ok(req) => {
            debug!(
                order_id = %req.order_id,
                new_price = req.new_price(),
                new_qty = req.new_qty(),
                ts_ns = req.ts_ns,
                latency_ms = latency_ms(req.ts_ns),
                "CancelReplaceRequest decodificado"
            );
            write_request(out, &req)?;
            Ok(Outcome::Decoded)
        }
        Err(err) => {
            warn!(error = %err, len = frame.len(), "frame descartado");
            write_failure(out)?;
            Ok(Outcome::DecodeFailed)
        }
    }
}

/// Latência = quando recebemos - quando o remetente carimbou. `0` sem carimbo.
fn latency_ms(ts_ns: u64) -> f64 {
    if ts_ns == 0 {
        return 0.0;
    }
    (now_ns() as f64 - ts_ns as f64) / 1_000_000.0
}
