use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use rephrase_engine::{ApiError, ClientSettings, RephraseApi, ReqwestApi, WireEvent};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    let settings = ClientSettings::with_base(&server.uri()).expect("mock server uri");
    ReqwestApi::new(settings).expect("client")
}

fn sse_body(payloads: &[&str]) -> String {
    payloads
        .iter()
        .map(|payload| format!("data: {payload}\n\n"))
        .collect()
}

#[tokio::test]
async fn start_job_posts_text_and_returns_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .and(body_json(json!({ "text": "Make me polite" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "session_id": "abc-123" })))
        .expect(1)
        .mount(&server)
        .await;

    let session = api_for(&server).start_job("Make me polite").await.unwrap();
    assert_eq!(session, "abc-123");
}

#[tokio::test]
async fn start_job_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "nope" })))
        .mount(&server)
        .await;

    let err = api_for(&server).start_job("Boom").await.unwrap_err();
    assert_eq!(err, ApiError::HttpStatus(500));
}

#[tokio::test]
async fn start_job_fails_without_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let err = api_for(&server).start_job("Hi").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn start_job_reports_unreachable_backend() {
    let settings = ClientSettings::with_base("http://127.0.0.1:9").unwrap();
    let api = ReqwestApi::new(settings).unwrap();
    let err = api.start_job("Hi").await.unwrap_err();
    assert!(
        matches!(err, ApiError::Transport(_) | ApiError::Timeout(_)),
        "got {err:?}"
    );
}

#[tokio::test]
async fn cancel_job_posts_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cancel"))
        .and(body_json(json!({ "session_id": "t-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "cancelling" })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = api_for(&server).cancel_job("t-1").await.unwrap();
    assert_eq!(ack.status.as_deref(), Some("cancelling"));
}

#[tokio::test]
async fn cancel_job_tolerates_unexpected_body_but_not_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cancel"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let ack = api.cancel_job("t-1").await.unwrap();
    assert_eq!(ack.status, None);
    assert_eq!(api.cancel_job("t-1").await.unwrap_err(), ApiError::HttpStatus(400));
}

#[tokio::test]
async fn stream_yields_decoded_events_in_order() {
    let server = MockServer::start().await;
    let body = sse_body(&[
        "{}",
        r#"{"style": "polite", "delta": "Please "}"#,
        "not json",
        r#"{"style": "polite", "delta": "and thank you."}"#,
        r#"{"style": "professional", "error": "boom", "final": true}"#,
        r#"{"done": true}"#,
    ]);
    Mock::given(method("GET"))
        .and(path("/stream"))
        .and(query_param("session", "abc-123"))
        .and(header("accept", "text/event-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let stream = api_for(&server).open_stream("abc-123").await.unwrap();
    let events: Vec<_> = stream.collect().await;

    assert_eq!(
        events,
        vec![
            Ok(WireEvent::Delta {
                style: "polite".to_string(),
                delta: "Please ".to_string(),
            }),
            Ok(WireEvent::Delta {
                style: "polite".to_string(),
                delta: "and thank you.".to_string(),
            }),
            Ok(WireEvent::StyleError {
                style: "professional".to_string(),
                message: "boom".to_string(),
            }),
            Ok(WireEvent::Done),
        ]
    );
}

#[tokio::test]
async fn stream_skips_named_events() {
    let server = MockServer::start().await;
    let body = "event: ping\ndata: {\"done\": true}\n\ndata: {\"cancelled\": true}\n\n";
    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let events: Vec<_> = api_for(&server)
        .open_stream("s")
        .await
        .unwrap()
        .collect()
        .await;
    assert_eq!(events, vec![Ok(WireEvent::Cancelled)]);
}

#[tokio::test]
async fn stream_for_unknown_session_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = api_for(&server).open_stream("missing").await.err();
    assert_eq!(err, Some(ApiError::HttpStatus(404)));
}

#[tokio::test]
async fn health_check_follows_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    assert_eq!(api_for(&server).check_health().await, Ok(()));

    let empty = MockServer::start().await;
    assert_eq!(
        api_for(&empty).check_health().await,
        Err(ApiError::HttpStatus(404))
    );
}
