use chrono::{DateTime, FixedOffset, ParseResult};
use serde::{Deserialize, Serialize};

/// Fixed part of every pong; the received ping is appended to it.
pub const PONG_PREFIX: &str = "Greetings from Pong! Ping Echoed: ";

/// Payload carried in both directions of an exchange.
///
/// The requester only ever fills `ping`. `pong` and `timestamp` belong to the
/// responder and stay empty until a reply arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeMessage {
    pub ping: String,
    pub pong: String,
    pub timestamp: String,
}

impl ExchangeMessage {
    /// Builds an outbound request with `pong` and `timestamp` left empty.
    pub fn request(ping: impl Into<String>) -> Self {
        Self {
            ping: ping.into(),
            ..Self::default()
        }
    }

    /// True once the responder has filled in its fields.
    pub fn is_reply(&self) -> bool {
        !self.pong.is_empty() && !self.timestamp.is_empty()
    }

    pub fn parsed_timestamp(&self) -> ParseResult<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
    }
}

#[tarpc::service]
pub trait PingPong {
    /// Echoes the ping back together with a pong and the time the call was handled.
    async fn ping_pong(request: ExchangeMessage) -> ExchangeMessage;
}
// Generates `PingPongClient` with `ping_pong` method
// Also generates `ServePingPong` via the `serve` method.
