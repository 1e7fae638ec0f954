use hermes::{Responder, ResponderConfig};
use std::net::{Ipv4Addr, SocketAddr, TcpListener};

/// Starts a responder on an ephemeral localhost port.
pub async fn start_test_responder() -> Responder {
    Responder::start(&ResponderConfig::new("127.0.0.1:0".to_string()))
        .await
        .expect("test responder should bind to an ephemeral port")
}

/// A localhost address nothing is listening on.
/// Binds a throwaway listener to learn a free port, then releases it.
pub fn unused_address() -> SocketAddr {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    listener.local_addr().unwrap()
}
