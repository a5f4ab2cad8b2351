//! Saída no Console
//!
//! stdout carrega somente estas linhas; diagnóstico vai para stderr via tracing.

use crate::types::CancelReplaceRequest;
use std::io::{self, Write};

/// Linha fixa impressa quando um frame não decodifica.
pub const DECODE_FAILURE_NOTICE: &str = "Failed to parse CancelReplaceRequest protobuf!";

/// Imprime os campos de um pedido decodificado, um por linha.
pub fn write_request<W: Write>(out: &mut W, req: &CancelReplaceRequest) -> io::Result<()> {
    writeln!(out, "Received CancelReplaceRequest:")?;
    writeln!(out, "  order_id: {}", req.order_id)?;
    writeln!(out, "  new_price: {}", req.new_price())?;
    writeln!(out, "  new_qty: {}", req.new_qty())?;
    writeln!(out, "  ts_ns: {}", req.ts_ns)?;
    if !req.symbol.is_empty() {
        writeln!(out, "  symbol: {}", req.symbol)?;
    }
    out.flush()
}

pub fn write_failure<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", DECODE_FAILURE_NOTICE)?;
    out.flush()
}
