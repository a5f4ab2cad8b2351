//! Receiver de CancelReplaceRequest - ZMQ PULL
//!
//! Faz bind num socket PULL, recebe frames binários do CommGateway, decodifica
//! cada um como `CancelReplaceRequest` (protobuf) e imprime os campos no stdout.
//! Frame inválido imprime uma linha fixa de falha e o loop continua.
//!
//! Roda até Ctrl-C / SIGTERM. Sem remetente conectado, fica bloqueado no
//! primeiro `recv` indefinidamente.
//!
//! Uso:
//!   ./target/release/cr-receiver
//!   ZMQ_ADDR=tcp://127.0.0.1:6000 STATS_INTERVAL_SECS=5 ./target/release/cr-receiver

use anyhow::Context;
use clap::Parser;
use cr_receiver::config::ReceiverArgs;
use cr_receiver::{logging, stats, Receiver};
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ========================================================================
    // Configuração (.env + CLI + variáveis de ambiente)
    // ========================================================================

    let _ = dotenvy::dotenv();
    let args = ReceiverArgs::parse();
    logging::init(args.json_logs);

    // ========================================================================
    // Socket PULL
    // ========================================================================

    let receiver = Receiver::bind(&args.zmq)
        .await
        .with_context(|| format!("bind em {}", args.zmq))?;

    let ticker = args
        .stats_interval()
        .map(|every| stats::spawn_ticker(receiver.stats(), every));

    // ========================================================================
    // Loop Principal (até sinal de shutdown)
    // ========================================================================

    let result = receiver.run(std::io::stdout(), shutdown_signal()).await;

    if let Some(ticker) = ticker {
        ticker.abort();
    }

    result.context("receiver interrompido")?;
    Ok(())
}

/// Completa no primeiro Ctrl-C ou SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Ctrl-C indisponível");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "SIGTERM indisponível");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
