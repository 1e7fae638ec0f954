use super::protocol::{ExchangeMessage, PONG_PREFIX};
use chrono::{DateTime, Local, SecondsFormat};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Answers exchange requests.
///
/// Clones share the last issued instant, so every timestamp handed out by one
/// handler (across all of its clones) is no earlier than the one before it.
#[derive(Debug, Clone, Default)]
pub struct PingPongHandler {
    last_issued: Arc<Mutex<Option<DateTime<Local>>>>,
}

impl PingPongHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the reply for `request`. Never fails, any ping is accepted.
    pub fn handle(&self, request: ExchangeMessage) -> ExchangeMessage {
        let handled_at = self.issue(Local::now());
        let timestamp = handled_at.to_rfc3339_opts(SecondsFormat::Nanos, false);
        info!(ping = %request.ping, %timestamp, "Received ping");

        ExchangeMessage {
            pong: format!("{}{}", PONG_PREFIX, request.ping),
            ping: request.ping,
            timestamp,
        }
    }

    // Clamp to the last issued instant when the wall clock steps backwards.
    fn issue(&self, now: DateTime<Local>) -> DateTime<Local> {
        let mut last = self
            .last_issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let issued = match *last {
            Some(previous) if previous > now => previous,
            _ => now,
        };
        *last = Some(issued);
        issued
    }
}
