// tests/http_transport_tests.rs
use lbaas_agent_rpc::api::{EntityStatus, LbaasAgentApi, L2PopulationApi, StatusUpdate};
use lbaas_agent_rpc::config::TransportConfig;
use lbaas_agent_rpc::rpc::RpcContext;
use lbaas_agent_rpc::transport::{HttpTransport, TransportError};
use mockito::Matcher;
use serde_json::json;
use std::collections::BTreeMap;
use url::Url;

const TOPIC: &str = "f5_lbaas_process_on_controller";

fn transport(base: &str) -> HttpTransport {
    transport_with_timeout(base, 5)
}

fn transport_with_timeout(base: &str, timeout_secs: u64) -> HttpTransport {
    HttpTransport::new(&TransportConfig {
        url: Url::parse(&format!("{}/rpc", base)).unwrap(),
        timeout_secs,
    })
    .unwrap()
}

#[tokio::test]
async fn test_call_posts_envelope_and_decodes_result() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rpc/f5_lbaas_process_on_controller")
        .match_body(Matcher::PartialJson(json!({
            "wait_for_reply": true,
            "context": {"is_admin": true},
            "message": {
                "method": "get_active_pool_ids",
                "namespace": null,
                "version": "1.0",
                "args": {"host": "agent-1"}
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"result": ["p1", "p2"], "failure": null}).to_string())
        .create_async()
        .await;

    let api = LbaasAgentApi::new(transport(&server.url()), TOPIC, RpcContext::admin(), "agent-1");
    let ids = api.get_active_pool_ids().await.unwrap();

    assert_eq!(ids, vec!["p1".to_string(), "p2".to_string()]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_failure_surfaces_as_remote_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/rpc/f5_lbaas_process_on_controller")
        .with_status(200)
        .with_body(
            json!({"failure": {"exc_type": "PoolNotFound", "message": "Pool p9 could not be found"}})
                .to_string(),
        )
        .create_async()
        .await;

    let api = LbaasAgentApi::new(transport(&server.url()), TOPIC, RpcContext::admin(), "agent-1");
    let err = api
        .update_pool_status(Some("p9"), &StatusUpdate::new(EntityStatus::Active))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Remote { ref exc_type, .. } if exc_type == "PoolNotFound"));
}

#[tokio::test]
async fn test_gateway_error_status_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/rpc/f5_lbaas_process_on_controller")
        .with_status(503)
        .create_async()
        .await;

    let api = LbaasAgentApi::new(transport(&server.url()), TOPIC, RpcContext::admin(), "agent-1");
    let err = api.pool_destroyed("p1").await.unwrap_err();

    assert!(matches!(err, TransportError::Rejected { status: 503 }));
}

#[tokio::test]
async fn test_undecodable_reply_is_serialization_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/rpc/f5_lbaas_process_on_controller")
        .with_status(200)
        .with_body(json!({"result": {"not": "a list"}}).to_string())
        .create_async()
        .await;

    let api = LbaasAgentApi::new(transport(&server.url()), TOPIC, RpcContext::admin(), "agent-1");
    let err = api.get_pending_pool_ids().await.unwrap_err();

    assert!(matches!(err, TransportError::Serialization(_)));
}

#[tokio::test]
async fn test_unreachable_gateway_is_disconnected() {
    // Nothing listens on port 1.
    let api = LbaasAgentApi::new(transport("http://127.0.0.1:1"), TOPIC, RpcContext::admin(), "agent-1");
    let err = api.get_active_pool_ids().await.unwrap_err();

    assert!(matches!(err, TransportError::Disconnected(_)), "got {err:?}");
}

#[tokio::test]
async fn test_stalled_gateway_times_out() {
    // Accepts connections but never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let api = LbaasAgentApi::new(
        transport_with_timeout(&format!("http://{}", addr), 1),
        TOPIC,
        RpcContext::admin(),
        "agent-1",
    );
    let started = std::time::Instant::now();
    let err = api.get_active_pool_ids().await.unwrap_err();

    assert!(matches!(err, TransportError::Timeout), "got {err:?}");
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
}

#[tokio::test]
async fn test_host_topic_with_colon_stays_on_gateway() {
    let mut server = mockito::Server::new_async().await;
    let to_host = server
        .mock("POST", "/rpc/q-agent-notifier-l2population-update.node:1")
        .with_status(202)
        .create_async()
        .await;

    let l2pop = L2PopulationApi::new(transport(&server.url()), "q-agent-notifier");
    l2pop
        .add_fdb_entries(&RpcContext::admin(), &BTreeMap::new(), Some("node:1"))
        .await
        .unwrap();

    to_host.assert_async().await;
}

#[tokio::test]
async fn test_l2pop_fanout_and_host_routes() {
    let mut server = mockito::Server::new_async().await;
    let fanout = server
        .mock("POST", "/rpc/q-agent-notifier-l2population-update_fanout")
        .match_body(Matcher::PartialJson(json!({
            "wait_for_reply": false,
            "message": {"method": "add_fdb_entries"}
        })))
        .with_status(202)
        .create_async()
        .await;
    let to_host = server
        .mock("POST", "/rpc/q-agent-notifier-l2population-update.agent-2")
        .match_body(Matcher::PartialJson(json!({
            "message": {"method": "remove_fdb_entries"}
        })))
        .with_status(202)
        .create_async()
        .await;

    let l2pop = L2PopulationApi::new(transport(&server.url()), "q-agent-notifier");
    let context = RpcContext::admin();
    let entries = BTreeMap::new();

    l2pop.add_fdb_entries(&context, &entries, None).await.unwrap();
    l2pop
        .remove_fdb_entries(&context, &entries, Some("agent-2"))
        .await
        .unwrap();

    fanout.assert_async().await;
    to_host.assert_async().await;
}
