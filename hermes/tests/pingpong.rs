mod common;

use common::start_test_responder;
use hermes::{ExchangeMessage, Requester, Responder, ResponderConfig, ResponderError, call};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hello_round_trip() {
        let responder = start_test_responder().await;
        let address = responder.local_addr().to_string();

        let exchange = call(&address, "Hello").await.unwrap();

        assert_eq!(exchange.reply.ping, "Hello");
        assert_eq!(exchange.reply.pong, "Greetings from Pong! Ping Echoed: Hello");
        assert!(!exchange.reply.timestamp.is_empty());
        assert!(
            exchange.reply.parsed_timestamp().is_ok(),
            "Timestamp '{}' should parse as RFC 3339",
            exchange.reply.timestamp
        );
        assert!(exchange.latency >= chrono::TimeDelta::zero());

        responder.abort();
    }

    #[tokio::test]
    async fn empty_ping_gets_well_formed_reply() {
        let responder = start_test_responder().await;
        let address = responder.local_addr().to_string();

        let reply = call(&address, "").await.unwrap().reply;

        assert_eq!(reply.ping, "");
        assert_eq!(reply.pong, hermes::pingpong::PONG_PREFIX);
        assert!(reply.parsed_timestamp().is_ok());

        responder.abort();
    }

    #[tokio::test]
    async fn reply_is_enriched_copy_of_request() {
        let responder = start_test_responder().await;
        let requester = Requester::connect(&responder.local_addr().to_string())
            .await
            .unwrap();

        let request = ExchangeMessage::request("echo me");
        assert!(!request.is_reply());

        let reply = requester.call(request.ping.clone()).await.unwrap().reply;
        assert_eq!(reply.ping, request.ping);
        assert!(reply.is_reply());
        assert!(reply.pong.contains(&request.ping));

        responder.abort();
    }

    #[tokio::test]
    async fn timestamps_non_decreasing_across_calls() {
        let responder = start_test_responder().await;
        let requester = Requester::connect(&responder.local_addr().to_string())
            .await
            .unwrap();

        let mut previous = None;
        for i in 0..20 {
            let stamp = requester
                .call(format!("ping {}", i))
                .await
                .unwrap()
                .reply
                .parsed_timestamp()
                .unwrap();
            if let Some(previous) = previous {
                assert!(stamp >= previous, "{} went backwards from {}", stamp, previous);
            }
            previous = Some(stamp);
        }

        responder.abort();
    }

    #[tokio::test]
    async fn separate_connections_share_responder_clock() {
        let responder = start_test_responder().await;
        let address = responder.local_addr().to_string();

        let first = call(&address, "first").await.unwrap().reply;
        let second = call(&address, "second").await.unwrap().reply;

        assert!(second.parsed_timestamp().unwrap() >= first.parsed_timestamp().unwrap());

        responder.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_requesters_are_answered_independently() {
        let responder = start_test_responder().await;
        let address = responder.local_addr().to_string();

        let calls = (0..16).map(|i| {
            let address = address.clone();
            tokio::spawn(async move { call(&address, format!("requester {}", i)).await })
        });
        let results = futures::future::join_all(calls).await;

        for (i, result) in results.into_iter().enumerate() {
            let reply = result.unwrap().unwrap().reply;
            assert_eq!(reply.ping, format!("requester {}", i));
            assert!(reply.pong.ends_with(&reply.ping));
        }

        responder.abort();
    }

    #[tokio::test]
    async fn bind_to_busy_address_fails() {
        let responder = start_test_responder().await;
        let busy = responder.local_addr().to_string();

        let result = Responder::start(&ResponderConfig::new(busy.clone())).await;
        match result {
            Err(ResponderError::Bind { address, .. }) => assert_eq!(address, busy),
            Err(e) => panic!("Expected bind error, got {}", e),
            Ok(_) => panic!("Second responder should not bind to {}", busy),
        }

        responder.abort();
    }

    #[tokio::test]
    async fn bind_to_unresolvable_address_fails() {
        let result =
            Responder::start(&ResponderConfig::new("not-an-address".to_string())).await;
        assert!(matches!(result, Err(ResponderError::Bind { .. })));
    }
}
