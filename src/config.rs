//! Configuração via CLI e Variáveis de Ambiente
//!
//! Cada flag tem uma variável de ambiente equivalente; `.env` é carregado
//! pelos binários antes do parse.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Receiver de CancelReplaceRequest (PULL).
#[derive(Parser, Debug, Clone)]
#[command(name = "cr-receiver")]
#[command(about = "Imprime os CancelReplaceRequest recebidos num socket ZMQ PULL", long_about = None)]
pub struct ReceiverArgs {
    /// Endpoint ZMQ para bind
    #[arg(long, env = "ZMQ_ADDR", default_value = "tcp://*:5555")]
    pub zmq: String,

    /// Intervalo (s) para logar contadores; 0 desliga
    #[arg(long, env = "STATS_INTERVAL_SECS", default_value_t = 0)]
    pub stats_interval_secs: u64,

    /// Logs em JSON (stderr)
    #[arg(long, env = "JSON_LOGS", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub json_logs: bool,
}

impl ReceiverArgs {
    pub fn stats_interval(&self) -> Option<Duration> {
        (self.stats_interval_secs > 0).then(|| Duration::from_secs(self.stats_interval_secs))
    }
}

/// Envia pedidos de um arquivo YAML para o receiver (PUSH).
#[derive(Parser, Debug, Clone)]
#[command(name = "cr-send")]
#[command(about = "Envia CancelReplaceRequest lidos de um YAML", long_about = None)]
pub struct SendArgs {
    /// Arquivo YAML com os pedidos
    pub file: PathBuf,

    /// Endpoint do receiver
    #[arg(long, env = "CR_SEND_ADDR", default_value = "tcp://127.0.0.1:5555")]
    pub addr: String,

    /// Pausa entre pedidos (ms)
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Repete o arquivo até ser interrompido
    #[arg(long = "loop", default_value_t = false)]
    pub repeat: bool,

    #[arg(long, env = "JSON_LOGS", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub json_logs: bool,
}
