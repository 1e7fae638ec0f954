use super::error::RequesterError;
use super::protocol::{ExchangeMessage, PingPongClient};
use crate::defaults::{DEFAULT_ADDRESS, DEFAULT_LOG_LEVEL, DEFAULT_PING};
use chrono::{DateTime, TimeDelta, Utc};
use clap::Parser;
use tarpc::{client, context, tokio_serde::formats::Json};
use tracing::{error, info, warn};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Ping-pong requester - sends one ping and reports the round trip", long_about = None)]
pub struct Flags {
    #[arg(long, default_value = DEFAULT_ADDRESS, help = "host:port of the responder")]
    pub address: String,

    #[arg(long, default_value = DEFAULT_PING, help = "Text to send as the ping")]
    pub ping: String,

    #[arg(long, help = "Stop at the first failure and exit non-zero instead of logging and continuing")]
    pub strict: bool,

    #[arg(long, default_value = DEFAULT_LOG_LEVEL, help = "Log filter used when RUST_LOG is unset")]
    pub log_level: String,
}

impl Flags {
    pub fn config(&self) -> RequesterConfig {
        let error_policy = if self.strict {
            ErrorPolicy::Abort
        } else {
            ErrorPolicy::Continue
        };
        RequesterConfig::new(self.address.clone(), self.ping.clone(), error_policy)
    }
}

/// What `exchange_once` does after a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the failure and carry on; the caller gets a zero-valued message.
    #[default]
    Continue,
    /// Return the first failure.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct RequesterConfig {
    pub address: String,
    pub ping: String,
    pub error_policy: ErrorPolicy,
}

impl Default for RequesterConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_ADDRESS.to_string(),
            DEFAULT_PING.to_string(),
            ErrorPolicy::default(),
        )
    }
}

/// One completed round trip.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub reply: ExchangeMessage,
    /// Wall-clock time taken just before the request was sent.
    pub sent_at: DateTime<Utc>,
    pub latency: TimeDelta,
}

impl Exchange {
    /// Stand-in for a failed round trip: zero-valued reply, zero latency.
    pub fn unanswered(sent_at: DateTime<Utc>) -> Self {
        Self {
            reply: ExchangeMessage::default(),
            sent_at,
            latency: TimeDelta::zero(),
        }
    }
}

pub struct Requester {
    address: String,
    client: PingPongClient,
}

impl Requester {
    /// Connects once; no retry, no backoff, transport-default timeouts.
    pub async fn connect(address: &str) -> Result<Self, RequesterError> {
        let mut transport = tarpc::serde_transport::tcp::connect(address, Json::default);
        transport.config_mut().max_frame_length(usize::MAX);
        let transport = transport
            .await
            .map_err(|source| RequesterError::Connection {
                address: address.to_string(),
                source,
            })?;
        let client = PingPongClient::new(client::Config::default(), transport).spawn();
        info!(%address, "Connected to responder");

        Ok(Self {
            address: address.to_string(),
            client,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Sends `ping` and waits for the reply, timing the round trip.
    pub async fn call(&self, ping: impl Into<String>) -> Result<Exchange, RequesterError> {
        let request = ExchangeMessage::request(ping);
        let sent_at = Utc::now();
        let reply = self.client.ping_pong(context::current(), request).await?;
        let latency = Utc::now().signed_duration_since(sent_at);

        info!(
            pong = %reply.pong,
            timestamp = %reply.timestamp,
            latency_us = latency.num_microseconds().unwrap_or(i64::MAX),
            "Received pong"
        );
        Ok(Exchange {
            reply,
            sent_at,
            latency,
        })
    }
}

/// Connects to `address` and performs a single exchange.
pub async fn call(address: &str, ping: impl Into<String>) -> Result<Exchange, RequesterError> {
    Requester::connect(address).await?.call(ping).await
}

/// Performs the single exchange the requester binary makes, honoring `config.error_policy`.
///
/// Under `ErrorPolicy::Continue` a failed connection is logged and the call is
/// still attempted, so it fails and is logged too. The caller then receives
/// `Exchange::unanswered` rather than an error.
pub async fn exchange_once(config: &RequesterConfig) -> Result<Exchange, RequesterError> {
    let requester = match Requester::connect(&config.address).await {
        Ok(requester) => Some(requester),
        Err(e) => {
            error!(error = %e, "Failed to connect to responder");
            if config.error_policy == ErrorPolicy::Abort {
                return Err(e);
            }
            None
        }
    };

    let attempted_at = Utc::now();
    let result = match &requester {
        Some(requester) => requester.call(config.ping.as_str()).await,
        None => Err(RequesterError::NotConnected {
            address: config.address.clone(),
        }),
    };

    match result {
        Ok(exchange) => Ok(exchange),
        Err(e) => {
            error!(error = %e, "Ping-pong call failed");
            match config.error_policy {
                ErrorPolicy::Abort => Err(e),
                ErrorPolicy::Continue => {
                    warn!("Continuing with an empty reply");
                    Ok(Exchange::unanswered(attempted_at))
                }
            }
        }
    }
}
