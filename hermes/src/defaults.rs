/// Central default configuration for the ping-pong responder and requester.
///
/// Both binaries and the config structs read their fallbacks from here, so the
/// two roles agree on where to meet without any shared global state.

/// Address the responder listens on and the requester dials by default.
pub const DEFAULT_ADDRESS: &str = "localhost:8888";

/// Payload the requester sends when none is given.
pub const DEFAULT_PING: &str = "Hello";

/// Tracing filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";
