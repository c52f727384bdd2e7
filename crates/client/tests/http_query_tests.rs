use std::time::Duration;

use dashchat_client::{HttpQueryService, NO_RESPONSE, QueryError, QueryRequest, QueryService};
use dashchat_core::DashboardContext;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY_PATH: &str = "/api/v1/ai_chat/query";

fn service(server: &MockServer) -> HttpQueryService {
    HttpQueryService::new(format!("{}{}", server.uri(), QUERY_PATH), Duration::from_secs(5)).expect("client")
}

fn request(prompt: &str) -> QueryRequest {
    QueryRequest::new(DashboardContext::Id(12), prompt)
}

#[tokio::test]
async fn query_success_returns_response_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"dashboard_id": 12, "prompt": "How is revenue?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "response": "Revenue is up 5%",
                "sql_query": "SELECT SUM(revenue) FROM sales"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server).query(request("How is revenue?")).await.expect("query");

    assert_eq!(result.response_text(), "Revenue is up 5%");
    assert_eq!(result.sql_query.as_deref(), Some("SELECT SUM(revenue) FROM sales"));
}

#[tokio::test]
async fn query_sends_zero_for_unset_dashboard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_json(json!({"dashboard_id": 0, "prompt": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"response": "hi"}})))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server)
        .query(QueryRequest::new(DashboardContext::default(), "hello"))
        .await
        .expect("query");
    assert_eq!(result.response_text(), "hi");
}

#[tokio::test]
async fn query_empty_response_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"response": ""}})))
        .mount(&server)
        .await;

    let result = service(&server).query(request("anything")).await.expect("query");
    assert_eq!(result.response_text(), NO_RESPONSE);
}

#[tokio::test]
async fn query_server_error_uses_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "No LLM provider configured"})))
        .mount(&server)
        .await;

    let err = service(&server).query(request("q")).await.unwrap_err();
    assert_eq!(err, QueryError::Status { status: 500, message: Some("No LLM provider configured".to_string()) });
    assert_eq!(err.detail().as_deref(), Some("No LLM provider configured"));
}

#[tokio::test]
async fn query_error_without_message_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = service(&server).query(request("q")).await.unwrap_err();
    assert_eq!(err.detail().as_deref(), Some("HTTP 502"));
}

#[tokio::test]
async fn query_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = service(&server).query(request("q")).await.unwrap_err();
    assert!(matches!(err, QueryError::Malformed(_)), "got {:?}", err);
}

#[tokio::test]
async fn query_missing_result_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "misplaced"})))
        .mount(&server)
        .await;

    let err = service(&server).query(request("q")).await.unwrap_err();
    assert_eq!(err, QueryError::Malformed("missing `result` field".to_string()));
}

#[tokio::test]
async fn query_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": {"response": "too late"}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let service =
        HttpQueryService::new(format!("{}{}", server.uri(), QUERY_PATH), Duration::from_millis(200)).expect("client");
    let err = service.query(request("q")).await.unwrap_err();

    assert!(err.is_timeout(), "got {:?}", err);
}

#[tokio::test]
async fn query_connection_refused_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let url = format!("http://127.0.0.1:{}{}", port, QUERY_PATH);

    let service = HttpQueryService::new(url, Duration::from_secs(2)).expect("client");
    let err = service.query(request("q")).await.unwrap_err();

    assert!(matches!(err, QueryError::Transport(_)), "got {:?}", err);
    assert!(err.detail().is_some());
}
