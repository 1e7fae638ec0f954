pub mod defaults;
pub mod logging;
pub mod pingpong;

// Re-export the exchange types at the top level for easy access
pub use pingpong::{
    ErrorPolicy, Exchange, ExchangeMessage, PingPongHandler, Requester, RequesterConfig,
    RequesterError, Responder, ResponderConfig, ResponderError, call, exchange_once,
};
