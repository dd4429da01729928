use super::*;
use crate::record::{LookupData, Outcome};
use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::{Value, json};
use std::collections::HashMap;

const PATH: &str = "/api/find-value";

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base: &str, style: RequestStyle, timeouts: Timeouts) -> HttpLookupService {
    HttpLookupService::new(format!("{base}{PATH}"), style, timeouts).unwrap()
}

// =========================================================================
// decode_response
// =========================================================================

#[test]
fn decode_prefers_body_status() {
    let result = decode_response(200, br#"{"status":429,"data":[]}"#).unwrap();
    assert_eq!(result.outcome(), Outcome::RateLimited);
}

#[test]
fn decode_falls_back_to_http_status_on_error_codes() {
    let result = decode_response(429, b"Too Many Requests").unwrap();
    assert_eq!(result, LookupResult::empty(429));
}

#[test]
fn decode_keeps_not_found_envelope_with_odd_payload() {
    for body in [
        &br#"{"status":404,"data":null}"#[..],
        br#"{"status":404,"data":"Not found"}"#,
        br#"{"status":404,"data":{"message":"none"}}"#,
        br#"{"status":404}"#,
    ] {
        let result = decode_response(200, body).unwrap();
        assert_eq!(result, LookupResult::empty(404));
        assert_eq!(result.outcome(), Outcome::NotFound);
    }
}

#[test]
fn decode_keeps_rate_limited_envelope_with_odd_payload() {
    for body in [&br#"{"status":429,"data":null}"#[..], br#"{"status":429,"data":"slow down"}"#] {
        let result = decode_response(200, body).unwrap();
        assert_eq!(result.outcome(), Outcome::RateLimited);
    }
}

#[test]
fn decode_mixed_list_stays_positional() {
    let result = decode_response(200, br#"{"status":200,"data":["001",5]}"#).unwrap();
    assert_eq!(result.data, LookupData::List(vec!["001".to_owned(), "5".to_owned()]));
}

#[test]
fn decode_rejects_garbage_success_body() {
    assert!(matches!(decode_response(200, b"<html>"), Err(LookupError::Decode(_))));
}

#[test]
fn style_follows_revision() {
    assert_eq!(RequestStyle::for_revision(Revision::Preview), None);
    assert_eq!(RequestStyle::for_revision(Revision::Query), Some(RequestStyle::Query));
    assert_eq!(RequestStyle::for_revision(Revision::Json), Some(RequestStyle::Json));
}

#[test]
fn from_config_targets_find_value_endpoint() {
    let config = LookupConfig::new("http://lookup.test/", Revision::Query, Timeouts::default()).unwrap();
    let service = HttpLookupService::from_config(&config).unwrap();
    assert_eq!(service.endpoint(), "http://lookup.test/api/find-value");
    assert_eq!(service.style(), RequestStyle::Query);
}

// =========================================================================
// HTTP round trips
// =========================================================================

#[tokio::test]
async fn query_style_sends_name_parameter() {
    let router = Router::new().route(
        PATH,
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let name = params.get("name").cloned().unwrap_or_default();
            axum::Json(json!({ "status": 200, "data": [name, "Dev"] }))
        }),
    );
    let base = spawn_server(router).await;

    let result = client(&base, RequestStyle::Query, Timeouts::default())
        .find(&LookupRequest::new("Nguyễn An"))
        .await
        .unwrap();

    assert_eq!(result.status, 200);
    assert_eq!(result.data, LookupData::List(vec!["Nguyễn An".to_owned(), "Dev".to_owned()]));
}

#[tokio::test]
async fn json_style_posts_name_body() {
    let router = Router::new().route(
        PATH,
        post(|axum::Json(body): axum::Json<Value>| async move {
            let name = body.get("name").cloned().unwrap_or(Value::Null);
            axum::Json(json!({
                "status": 200,
                "data": { "EmployeeId": "001", "EmployeeName": name, "position": "Dev" },
            }))
        }),
    );
    let base = spawn_server(router).await;

    let result = client(&base, RequestStyle::Json, Timeouts::default())
        .find(&LookupRequest::new("An"))
        .await
        .unwrap();

    let LookupData::Record(record) = result.data else {
        panic!("expected record payload");
    };
    assert_eq!(record.employee_name.as_deref(), Some("An"));
    assert_eq!(record.employee_id.as_deref(), Some("001"));
}

#[tokio::test]
async fn bare_429_reads_as_rate_limited() {
    let router = Router::new().route(PATH, post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }));
    let base = spawn_server(router).await;

    let result = client(&base, RequestStyle::Json, Timeouts::default())
        .find(&LookupRequest::new("An"))
        .await
        .unwrap();

    assert_eq!(result.outcome(), Outcome::RateLimited);
}

#[tokio::test]
async fn wrong_method_reads_as_not_found() {
    // Only GET is routed, so the POST gets a bare 405.
    let router = Router::new().route(PATH, get(|| async { "unused" }));
    let base = spawn_server(router).await;

    let result = client(&base, RequestStyle::Json, Timeouts::default())
        .find(&LookupRequest::new("An"))
        .await
        .unwrap();

    assert_eq!(result.status, 405);
    assert_eq!(result.outcome(), Outcome::NotFound);
}

#[tokio::test]
async fn unreachable_host_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"), RequestStyle::Json, Timeouts::default())
        .find(&LookupRequest::new("An"))
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Request(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let router = Router::new().route(
        PATH,
        post(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            "late"
        }),
    );
    let base = spawn_server(router).await;

    let err = client(&base, RequestStyle::Json, Timeouts { request_secs: 1, connect_secs: 1 })
        .find(&LookupRequest::new("An"))
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Timeout), "unexpected error: {err}");
}
