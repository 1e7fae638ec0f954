//! Ping-pong exchange over tarpc.
//! Provides `Responder` (listens and answers) and `Requester` (sends one ping and measures the round trip).

mod client;
mod error;
mod handler;
mod protocol;
mod server;

pub use client::{ErrorPolicy, Exchange, Requester, RequesterConfig, call, exchange_once};
pub use error::{RequesterError, ResponderError};
pub use handler::PingPongHandler;
pub use protocol::{ExchangeMessage, PONG_PREFIX, PingPong, PingPongClient};
pub use server::{Responder, ResponderConfig};

/// Command-line flags for the two binaries.
pub mod flags {
    pub use super::client::Flags as RequesterFlags;
    pub use super::server::Flags as ResponderFlags;
}
