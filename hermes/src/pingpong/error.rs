use std::io;

use tarpc::client::RpcError;
use thiserror::Error;

/// Failures that stop a responder from serving.
#[derive(Debug, Error)]
pub enum ResponderError {
    /// The listening socket could not be bound
    #[error("failed to bind responder to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },
    /// Accepting an inbound connection failed; the accept loop ends
    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),
    /// The accept loop task panicked
    #[error("responder task stopped unexpectedly: {0}")]
    Stopped(#[from] tokio::task::JoinError),
}

/// Failures of a single requester exchange.
#[derive(Debug, Error)]
pub enum RequesterError {
    /// No connection to the responder could be established
    #[error("failed to connect to responder at {address}: {source}")]
    Connection {
        address: String,
        #[source]
        source: io::Error,
    },
    /// The remote call returned an error
    #[error("ping-pong call failed: {0}")]
    Call(#[from] RpcError),
    /// A call was attempted without an established connection
    #[error("ping-pong call to {address} was not sent: no connection")]
    NotConnected { address: String },
}

impl RequesterError {
    /// True for failures raised before any request reached the wire.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}
