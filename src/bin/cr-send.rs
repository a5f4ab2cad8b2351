//! Remetente de demonstração: envia os pedidos de um YAML para o receiver.
//!
//! Uso:
//!   ./target/release/cr-send demos/demo_orders.yaml --delay-ms 500
//!   ./target/release/cr-send demos/demo_orders.yaml --loop

use anyhow::Context;
use clap::Parser;
use cr_receiver::config::SendArgs;
use cr_receiver::logging;
use cr_receiver::sender::{load_rows, send_rows, Sender};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = SendArgs::parse();
    logging::init(args.json_logs);

    let rows = load_rows(&args.file)?;

    let mut sender = Sender::connect(&args.addr)
        .await
        .with_context(|| format!("conectar em {}", args.addr))?;
    info!(addr = %args.addr, total = rows.len(), "conectado, enviando pedidos");

    let count = send_rows(&mut sender, &rows, Duration::from_millis(args.delay_ms), args.repeat)
        .await
        .context("envio interrompido")?;

    sender.close().await;
    info!(count, "todos os pedidos enviados");
    Ok(())
}
