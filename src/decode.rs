//! Decodificação das Mensagens Recebidas

use crate::types::CancelReplaceRequest;
use prost::Message;
use thiserror::Error;

/// O buffer recebido não é uma serialização válida de `CancelReplaceRequest`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("protobuf inválido: {0}")]
pub struct DecodeFailure(#[from] pub prost::DecodeError);

/// Decodifica um frame bruto como `CancelReplaceRequest`.
///
/// Buffer vazio é a serialização da mensagem com todos os campos default e
/// portanto decodifica com sucesso.
///
/// # Argumentos
/// * `bytes` - Conteúdo de um frame recebido no socket
///
/// # Retorno
/// O pedido decodificado ou `DecodeFailure`
pub fn decode_request(bytes: &[u8]) -> Result<CancelReplaceRequest, DecodeFailure> {
    Ok(CancelReplaceRequest::decode(bytes)?)
}
