//! Async client operations against a mock LogLake endpoint.

use loglake_memory::{
    AddOptions, AsyncMemoryClient, Config, Error, ListOptions, MemoryStoreUpdate, MemoryUpdate,
    ScopeFilter, SearchOptions,
};
use mockito::{Matcher, ServerGuard};
use serde_json::json;

fn client_for(server: &ServerGuard) -> AsyncMemoryClient {
    let config = Config::access_key(server.url(), "test-ak", "test-sk");
    AsyncMemoryClient::new(config, "proj", "store").expect("client construction")
}

/// Client pointing at a closed port; used to prove validation failures
/// never reach the network.
fn offline_client() -> AsyncMemoryClient {
    let config = Config::access_key("http://127.0.0.1:9", "test-ak", "test-sk");
    AsyncMemoryClient::new(config, "proj", "store").expect("client construction")
}

#[test]
fn constructor_rejects_empty_binding() {
    let config = Config::access_key("http://127.0.0.1:9", "ak", "sk");
    let err = AsyncMemoryClient::new(config.clone(), "", "store").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Validation error: project is required");

    let err = AsyncMemoryClient::new(config, "proj", "").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Validation error: memory_store is required");
}

#[tokio::test]
async fn add_normalizes_string_input_and_flattens_the_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/projects/proj/memorystores/store/memories")
        .match_body(Matcher::PartialJson(json!({
            "messages": [{"role": "user", "content": "I love tennis"}],
            "infer": true,
            "asyncMode": true,
            "userId": "user123",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results": [{"status": "PENDING", "eventId": "e1"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let body = client
        .add("I love tennis", &AddOptions::for_user("user123"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body["results"][0]["status"], json!("PENDING"));
}

#[tokio::test]
async fn add_without_a_body_reports_an_empty_results_list() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/projects/proj/memorystores/store/memories")
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server);
    let body = client.add("hello", &AddOptions::default()).await.unwrap();
    assert_eq!(body.get("results"), Some(&json!([])));
}

#[tokio::test]
async fn get_flattens_the_memory_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/projects/proj/memorystores/store/memories/mem_1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "mem_1", "memory": "loves tennis", "score": 0.92}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let memory = client.get("mem_1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(memory.get("memory"), Some(&json!("loves tennis")));
    assert_eq!(memory.get("score"), Some(&json!(0.92)));
}

#[tokio::test]
async fn get_rejects_an_empty_memory_id_without_calling_out() {
    let err = offline_client().get("").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Validation error: memory_id is required");
}

#[tokio::test]
async fn get_all_sends_scope_as_query_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/projects/proj/memorystores/store/memories")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("userId".into(), "u1".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results": [{"id": "a"}, {"id": "b"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let options = ListOptions {
        scope: ScopeFilter::user("u1"),
        limit: Some(10),
    };
    let page = client.get_all(&options).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].get("id"), Some(&json!("a")));
}

#[tokio::test]
async fn get_all_with_a_body_but_no_results_field_yields_an_empty_page() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/projects/proj/memorystores/store/memories")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"count": 0}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let page = client.get_all(&ListOptions::default()).await.unwrap();
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn search_posts_the_query_and_returns_ordered_results() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/projects/proj/memorystores/store/memories/search")
        .match_body(Matcher::PartialJson(json!({
            "query": "tennis",
            "rerank": true,
            "topK": 5,
            "userId": "u1",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results": [{"id": "a", "score": 0.9}, {"id": "b", "score": 0.5}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let options = SearchOptions {
        scope: ScopeFilter::user("u1"),
        top_k: Some(5),
        rerank: true,
    };
    let hits = client.search("tennis", &options).await.unwrap();

    mock.assert_async().await;
    assert_eq!(hits.results.len(), 2);
    assert_eq!(hits.results[0].get("id"), Some(&json!("a")));
    assert_eq!(hits.results[1].get("id"), Some(&json!("b")));
}

#[tokio::test]
async fn search_rejects_an_empty_query_without_calling_out() {
    let err = offline_client()
        .search("", &SearchOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Validation error: query is required");
}

#[tokio::test]
async fn update_requires_text_or_metadata() {
    let err = offline_client()
        .update("mem_1", &MemoryUpdate::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("text or metadata"));
}

#[tokio::test]
async fn update_rejects_an_empty_memory_id() {
    let err = offline_client()
        .update("", &MemoryUpdate::text("new"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn update_returns_status_and_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/projects/proj/memorystores/store/memories/mem_1")
        .match_body(Matcher::PartialJson(json!({"text": "loves tennis on weekends"})))
        .with_status(200)
        .with_header("x-log-requestid", "req-9")
        .create_async()
        .await;

    let client = client_for(&server);
    let status = client
        .update("mem_1", &MemoryUpdate::text("loves tennis on weekends"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(status.status_code, 200);
    assert_eq!(status.headers.get("x-log-requestid"), Some(&"req-9".to_string()));
}

#[tokio::test]
async fn delete_rejects_an_empty_memory_id() {
    let err = offline_client().delete("").await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn delete_targets_the_memory_resource() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/projects/proj/memorystores/store/memories/mem_1")
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server);
    let status = client.delete("mem_1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(status.status_code, 200);
}

#[tokio::test]
async fn delete_all_forwards_the_scope() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/projects/proj/memorystores/store/memories")
        .match_query(Matcher::UrlEncoded("runId".into(), "r1".into()))
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server);
    let scope = ScopeFilter::default().with_run_id("r1");
    let status = client.delete_all(&scope).await.unwrap();

    mock.assert_async().await;
    assert_eq!(status.status_code, 200);
}

#[tokio::test]
async fn history_flattens_the_list_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/projects/proj/memorystores/store/memories/mem_1/history")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"event": "ADD"}, {"event": "UPDATE", "newMemory": "updated"}]"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let history = client.history("mem_1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].get("event"), Some(&json!("ADD")));
    assert_eq!(history[1].get("newMemory"), Some(&json!("updated")));
}

#[tokio::test]
async fn history_rejects_an_empty_memory_id() {
    let err = offline_client().history("").await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn backend_errors_propagate_undecoded() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/projects/proj/memorystores/store/memories/mem_gone")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_header("x-log-requestid", "req-1")
        .with_body(r#"{"errorCode": "MemoryNotExist", "errorMessage": "memory mem_gone does not exist"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get("mem_gone").await.unwrap_err();

    match err {
        Error::Api {
            status,
            error_code,
            message,
            request_id,
        } => {
            assert_eq!(status, 404);
            assert_eq!(error_code, "MemoryNotExist");
            assert_eq!(message, "memory mem_gone does not exist");
            assert_eq!(request_id.as_deref(), Some("req-1"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn describe_memory_store_flattens_the_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/projects/proj/memorystores/store")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name": "store", "strategy": "default", "shortTermTtl": 7}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let info = client.describe_memory_store().await.unwrap();

    mock.assert_async().await;
    assert_eq!(info.get("name"), Some(&json!("store")));
    assert_eq!(info.get("shortTermTtl"), Some(&json!(7)));
}

#[tokio::test]
async fn update_memory_store_sends_only_set_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/projects/proj/memorystores/store")
        .match_body(Matcher::Json(json!({"enableGraph": true})))
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server);
    let update = MemoryStoreUpdate {
        enable_graph: Some(true),
        ..MemoryStoreUpdate::default()
    };
    let status = client.update_memory_store(&update).await.unwrap();

    mock.assert_async().await;
    assert_eq!(status.status_code, 200);
}

#[tokio::test]
async fn delete_memory_store_targets_the_store_resource() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/projects/proj/memorystores/store")
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server);
    let status = client.delete_memory_store().await.unwrap();

    mock.assert_async().await;
    assert_eq!(status.status_code, 200);
}
