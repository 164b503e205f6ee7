//! Tests for HTTP error rendering.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let value = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, header, value)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("who"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("no"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("gone"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_details_are_redacted(expected_trace_id: String) {
    let error = Error::internal("listing repository error: relation does not exist")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "sql": "SELECT" }));

    let (status, header, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["traceId"], expected_trace_id);
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn outage_messages_are_redacted() {
    let error = Error::service_unavailable("identity store unavailable: connection refused");

    let (status, header, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(header.is_none());
    assert_eq!(body["message"], "Service temporarily unavailable");
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_their_payload() {
    let error = Error::invalid_request("name must not be empty")
        .with_details(json!({ "field": "name" }));

    let (_, _, body) = body_of(&error).await;

    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], "name must not be empty");
    assert_eq!(body["details"]["field"], "name");
}
