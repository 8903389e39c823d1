use std::collections::HashSet;
use std::time::Duration;

use pretty_assertions::assert_eq;
use querent_engine::{
    EngineEvent, EngineHandle, FailureKind, QueryId, QueryRequest, QuerySender, ReqwestSender,
    SubmitSettings,
};
use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> SubmitSettings {
    SubmitSettings {
        endpoint: server.uri(),
        ..SubmitSettings::default()
    }
}

#[tokio::test]
async fn sender_posts_the_exact_json_body_without_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let query_id = QueryId::generate();
    let request = QueryRequest::for_question("What is reincarnation?", &query_id);
    let sender = ReqwestSender::new(settings_for(&server));

    sender.send(&request).await.expect("delivery ok");

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 1);
    let body: Value = received[0].body_json().expect("json body");
    assert_eq!(body, serde_json::to_value(&request).unwrap());
    // Credentials omitted: no cookies travel with the request.
    assert!(received[0].headers.get("cookie").is_none());
}

#[tokio::test]
async fn sender_ignores_the_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&server)
        .await;

    let query_id = QueryId::generate();
    let request = QueryRequest::for_question("question", &query_id);
    let sender = ReqwestSender::new(settings_for(&server));

    assert_eq!(sender.send(&request).await, Ok(()));
}

#[tokio::test]
async fn sender_classifies_http_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let query_id = QueryId::generate();
    let request = QueryRequest::for_question("question", &query_id);
    let sender = ReqwestSender::new(settings_for(&server));

    let err = sender.send(&request).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
}

#[tokio::test]
async fn sender_times_out_on_a_slow_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let query_id = QueryId::generate();
    let request = QueryRequest::for_question("question", &query_id);
    let settings = SubmitSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let sender = ReqwestSender::new(settings);

    let err = sender.send(&request).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_runs_rapid_submissions_independently() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let (engine, events) = EngineHandle::spawn(settings_for(&server));

    // Two submissions of the same question, back to back, each with its own
    // freshly generated query id.
    engine.submit(1, QueryRequest::for_question("same", &QueryId::generate()));
    engine.submit(2, QueryRequest::for_question("same", &QueryId::generate()));

    let mut seen = HashSet::new();
    for _ in 0..2 {
        let event = events
            .recv_timeout(Duration::from_secs(5))
            .expect("completion event");
        let EngineEvent::SubmitCompleted {
            submission_id,
            result,
        } = event;
        assert_eq!(result, Ok(()));
        seen.insert(submission_id);
    }
    assert_eq!(seen, HashSet::from([1, 2]));

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 2);
    let first: Value = received[0].body_json().unwrap();
    let second: Value = received[1].body_json().unwrap();
    assert_ne!(first["query_id"], second["query_id"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_reports_failures_without_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let (engine, events) = EngineHandle::spawn(settings_for(&server));
    engine.submit(7, QueryRequest::for_question("lost", &QueryId::generate()));

    let event = events
        .recv_timeout(Duration::from_secs(5))
        .expect("completion event");
    let EngineEvent::SubmitCompleted {
        submission_id,
        result,
    } = event;
    assert_eq!(submission_id, 7);
    assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(404));
}
