//! Remetente de Demonstração (PUSH)
//!
//! Lê pedidos de um arquivo YAML e envia para o receiver, fazendo o papel do
//! CommGateway em testes manuais.
//!
//! Formato do arquivo:
//!
//! ```yaml
//! - { order_id: ABC123, qty: 10, px: 101.5, ts_ns: 1700000000000000000 }
//! - { proto: 10001, qty: 15, px: 124.0, sym: AAPL }
//! ```

use crate::types::{now_ns, CancelReplaceRequest};
use prost::Message;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use zeromq::{PushSocket, Socket, SocketSend, ZmqError, ZmqMessage};

#[derive(Error, Debug)]
pub enum SenderError {
    #[error("falha ao conectar em {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: ZmqError,
    },

    #[error("falha ao enviar: {0}")]
    Send(#[from] ZmqError),

    #[error("falha ao ler {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML inválido em {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("nenhum pedido em {path}")]
    Empty { path: String },
}

/// Identificador da ordem: o YAML pode trazer número ou texto.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(u64),
    Text(String),
}

impl OrderId {
    fn into_string(self) -> String {
        match self {
            OrderId::Number(n) => n.to_string(),
            OrderId::Text(s) => s,
        }
    }
}

/// Uma linha do arquivo de pedidos.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Row {
    #[serde(alias = "proto")]
    pub order_id: OrderId,
    pub qty: u32,
    pub px: f64,
    /// Sem carimbo, o remetente usa o instante do envio.
    #[serde(default)]
    pub ts_ns: Option<u64>,
    #[serde(default)]
    pub sym: Option<String>,
}

impl Row {
    pub fn to_request(&self, now_ns: u64) -> CancelReplaceRequest {
        let mut req = CancelReplaceRequest::new(
            self.order_id.clone().into_string(),
            self.px,
            self.qty,
            self.ts_ns.unwrap_or(now_ns),
        );
        if let Some(sym) = &self.sym {
            req.symbol = sym.clone();
        }
        req
    }
}

/// Lê todas as linhas de um arquivo YAML. Arquivo sem pedidos é erro.
pub fn load_rows(path: &Path) -> Result<Vec<Row>, SenderError> {
    let text = std::fs::read_to_string(path).map_err(|source| SenderError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let rows = parse_rows(&text).map_err(|source| SenderError::Yaml {
        path: path.display().to_string(),
        source,
    })?;
    if rows.is_empty() {
        return Err(SenderError::Empty {
            path: path.display().to_string(),
        });
    }
    Ok(rows)
}

/// Documento vazio vira lista vazia.
pub fn parse_rows(text: &str) -> Result<Vec<Row>, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let rows: Option<Vec<Row>> = serde_yaml::from_str(text)?;
    Ok(rows.unwrap_or_default())
}

/// Socket PUSH conectado ao receiver.
pub struct Sender {
    socket: PushSocket,
}

impl Sender {
    /// Conecta ao receiver em `addr`.
    ///
    /// Sem receiver escutando, o `zeromq` continua tentando e esta chamada não
    /// retorna até o receiver subir.
    pub async fn connect(addr: &str) -> Result<Self, SenderError> {
        info!("aguardando receiver em {}", addr);
        let mut socket = PushSocket::new();
        socket
            .connect(addr)
            .await
            .map_err(|source| SenderError::Connect {
                addr: addr.to_string(),
                source,
            })?;
        Ok(Self { socket })
    }

    /// Serializa e envia um pedido.
    pub async fn send(&mut self, req: &CancelReplaceRequest) -> Result<(), SenderError> {
        self.send_raw(req.encode_to_vec()).await
    }

    /// Envia bytes arbitrários como um frame (útil para testar o receiver com lixo).
    pub async fn send_raw(&mut self, bytes: Vec<u8>) -> Result<(), SenderError> {
        self.socket.send(ZmqMessage::from(bytes)).await?;
        Ok(())
    }

    pub async fn close(self) {
        for err in self.socket.close().await {
            warn!(error = %err, "erro ao fechar socket");
        }
    }
}

/// Envia cada linha na ordem do arquivo, com `delay` entre pedidos.
///
/// Com `repeat`, recomeça o arquivo indefinidamente e só retorna em erro.
///
/// # Retorno
/// Número de pedidos enviados
pub async fn send_rows(
    sender: &mut Sender,
    rows: &[Row],
    delay: Duration,
    repeat: bool,
) -> Result<u64, SenderError> {
    let mut count = 0u64;

    loop {
        for row in rows {
            let req = row.to_request(now_ns());
            sender.send(&req).await?;
            count += 1;
            info!(
                order_id = %req.order_id,
                qty = req.new_qty(),
                px = req.new_price(),
                "pedido enviado"
            );
            tokio::time::sleep(delay).await;
        }

        if !repeat {
            return Ok(count);
        }
    }
}
