// No graceful shutdown: the accept loop runs until an accept fails or the task is aborted.

use super::error::ResponderError;
use super::handler::PingPongHandler;
use super::protocol::{ExchangeMessage, PingPong};
use crate::defaults::{DEFAULT_ADDRESS, DEFAULT_LOG_LEVEL};
use clap::Parser;
use futures::{StreamExt, TryStreamExt, future};
use std::net::SocketAddr;
use tarpc::{
    context,
    server::{self, Channel},
    tokio_serde::formats::Json,
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Ping-pong responder - echoes every ping with a pong and a timestamp", long_about = None)]
pub struct Flags {
    #[arg(long, default_value = DEFAULT_ADDRESS, help = "host:port to listen on")]
    pub address: String,

    #[arg(long, default_value = DEFAULT_LOG_LEVEL, help = "Log filter used when RUST_LOG is unset")]
    pub log_level: String,
}

impl Flags {
    pub fn config(&self) -> ResponderConfig {
        ResponderConfig::new(self.address.clone())
    }
}

/// Where the responder listens. Built once at startup and handed to `Responder::start`.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct ResponderConfig {
    pub address: String,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS.to_string())
    }
}

#[derive(derive_new::new, Clone)]
struct PingPongServer {
    handler: PingPongHandler,
}

impl PingPong for PingPongServer {
    async fn ping_pong(self, _: context::Context, request: ExchangeMessage) -> ExchangeMessage {
        self.handler.handle(request)
    }
}

/// A bound responder whose accept loop runs on a background task.
pub struct Responder {
    local_addr: SocketAddr,
    task: JoinHandle<Result<(), ResponderError>>,
}

impl Responder {
    /// Binds `config.address` and starts accepting connections.
    ///
    /// Every connection becomes its own tarpc channel on its own task, and each
    /// call on a channel is spawned separately. All of them share one
    /// `PingPongHandler`, so timestamps stay ordered across connections.
    pub async fn start(config: &ResponderConfig) -> Result<Self, ResponderError> {
        let mut listener =
            tarpc::serde_transport::tcp::listen(config.address.as_str(), Json::default)
                .await
                .map_err(|source| {
                    error!(address = %config.address, error = %source, "Failed to bind responder");
                    ResponderError::Bind {
                        address: config.address.clone(),
                        source,
                    }
                })?;
        listener.config_mut().max_frame_length(usize::MAX);
        let local_addr = listener.local_addr();
        info!(address = %local_addr, "Responder listening");

        let handler = PingPongHandler::new();
        let accept_loop = async move {
            listener
                .map_err(|source| {
                    error!(error = %source, "Failed to accept connection");
                    ResponderError::Accept(source)
                })
                .try_for_each(|transport| {
                    if let Ok(peer) = transport.peer_addr() {
                        debug!(%peer, "Accepted connection");
                    }
                    let server = PingPongServer::new(handler.clone());
                    let channel = server::BaseChannel::with_defaults(transport);
                    tokio::spawn(channel.execute(server.serve()).for_each(|call| async move {
                        tokio::spawn(call);
                    }));
                    future::ok(())
                })
                .await
        };

        Ok(Self {
            local_addr,
            task: tokio::spawn(accept_loop),
        })
    }

    /// The address actually bound, which differs from the configured one when port 0 was asked for.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn abort(&self) {
        self.task.abort();
    }

    /// Waits for the accept loop to end. An aborted loop is a clean stop.
    pub async fn wait(self) -> Result<(), ResponderError> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
