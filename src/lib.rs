//! Receiver de diagnóstico para `CancelReplaceRequest`.
//!
//! Faz bind num socket ZMQ PULL, decodifica cada frame como protobuf e imprime
//! os campos no console. Serve para conferir manualmente que o CommGateway
//! emite mensagens bem formadas.

pub mod config;
pub mod decode;
pub mod logging;
pub mod receiver;
pub mod report;
pub mod sender;
pub mod stats;
pub mod types;

pub use decode::{decode_request, DecodeFailure};
pub use receiver::{handle_frame, Outcome, Receiver, ReceiverError};
pub use sender::Sender;
pub use stats::StatsSnapshot;
pub use types::{CancelReplaceRequest, ReplaceParams};
