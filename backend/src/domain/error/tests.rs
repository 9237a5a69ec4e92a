//! Tests for the error payload constructors and serialisation contract.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn trace_id_is_absent_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::conflict("email already exists") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_to_camel_case_without_empty_fields() {
    let error = Error::not_found("user not found");
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(value, json!({ "code": "not_found", "message": "user not found" }));
}

#[rstest]
fn serialises_details_and_trace_id(expected_trace_id: String) {
    let error = Error::conflict("email already exists")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "code": "duplicate_email" }));
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(value["code"], "conflict");
    assert_eq!(value["traceId"], expected_trace_id);
    assert_eq!(value["details"]["code"], "duplicate_email");
}

#[rstest]
fn deserialising_blank_message_fails() {
    let payload = json!({ "code": "conflict", "message": " " });
    let result = serde_json::from_value::<Error>(payload);
    assert!(result.is_err());
}

#[rstest]
fn deserialising_preserves_payload_fields(expected_trace_id: String) {
    let payload = json!({
        "code": "invalid_request",
        "message": "email must be a valid address",
        "traceId": expected_trace_id,
        "details": { "field": "email" },
    });
    let error: Error = serde_json::from_value(payload).expect("valid payload");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.trace_id(), Some(TRACE_ID));
    assert_eq!(error.details(), Some(&json!({ "field": "email" })));
}
