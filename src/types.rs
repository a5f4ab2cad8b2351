//! Tipos e estruturas de dados
//!
//! Espelham o schema protobuf `cr.CancelReplaceRequest` emitido pelo CommGateway:
//!
//! ```proto
//! message ReplaceParams {
//!   double new_price = 1;
//!   uint32 new_qty   = 2;
//! }
//!
//! message CancelReplaceRequest {
//!   string        order_id = 1;
//!   ReplaceParams params   = 2;
//!   uint64        ts_ns    = 3;
//!   string        symbol   = 4;
//! }
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

/// Timestamp atual em nanossegundos desde a época Unix (`0` se o relógio estiver antes de 1970).
pub fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Pedido de cancel/replace de uma ordem.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CancelReplaceRequest {
    #[prost(string, tag = "1")]
    pub order_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub params: ::core::option::Option<ReplaceParams>,
    #[prost(uint64, tag = "3")]
    pub ts_ns: u64,
    /// Vazio quando o remetente não informa o símbolo.
    #[prost(string, tag = "4")]
    pub symbol: ::prost::alloc::string::String,
}

/// Novos preço e quantidade da ordem.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReplaceParams {
    #[prost(double, tag = "1")]
    pub new_price: f64,
    #[prost(uint32, tag = "2")]
    pub new_qty: u32,
}

impl CancelReplaceRequest {
    /// Monta um pedido completo (usado pelo remetente de demonstração e pelos testes).
    pub fn new(order_id: impl Into<String>, new_price: f64, new_qty: u32, ts_ns: u64) -> Self {
        Self {
            order_id: order_id.into(),
            params: Some(ReplaceParams { new_price, new_qty }),
            ts_ns,
            symbol: String::new(),
        }
    }

    /// Preço novo; `0` se `params` não veio na mensagem.
    pub fn new_price(&self) -> f64 {
        self.params.as_ref().map_or(0.0, |p| p.new_price)
    }

    /// Quantidade nova; `0` se `params` não veio na mensagem.
    pub fn new_qty(&self) -> u32 {
        self.params.as_ref().map_or(0, |p| p.new_qty)
    }
}
