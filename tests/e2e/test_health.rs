use crate::e2e::helpers;

use helpers::{stubs::StubSpeechRepository, TestContext};
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ready_status(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("speech").and_then(|v| v.as_str()), Some("stub"));
    assert_eq!(body.get("voices").and_then(|v| v.as_u64()), Some(2));
}

#[tokio::test]
async fn it_should_not_be_ready_without_voices() {
    let ctx = TestContext::with_speech(StubSpeechRepository::with_voices(&[]))
        .await
        .unwrap();

    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("not_ready"));
    assert_eq!(body.get("voices").and_then(|v| v.as_u64()), Some(0));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_health_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_echo_caller_request_id(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/health", &[("x-request-id", "trace-1234")])
        .await
        .unwrap();

    response.assert_header("x-request-id", "trace-1234");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_unique_request_ids(ctx: &TestContext) {
    let first = ctx.client.get("/health").await.unwrap();
    let second = ctx.client.get("/health").await.unwrap();

    assert_ne!(first.header("x-request-id"), second.header("x-request-id"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_allow_cross_origin_requests(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/health", &[("origin", "http://localhost:3000")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("access-control-allow-origin", "*");
}
