//! Tests for HTTP error mapping.

use super::*;
use crate::domain::ports::StoreError;
use crate::domain::sentinels::{
    DEVICE_NAME_DUPLICATED, MAX_TAG_REACHED, PAYMENT_REQUIRED, USER_INVALID, USER_NOT_FOUND,
};
use actix_web::body::to_bytes;
use rstest::rstest;

#[rstest]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::Duplicated, StatusCode::CONFLICT)]
#[case(ErrorCode::Limit, StatusCode::FORBIDDEN)]
#[case(ErrorCode::Invalid, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::Payment, StatusCode::PAYMENT_REQUIRED)]
#[case(ErrorCode::Store, StatusCode::INTERNAL_SERVER_ERROR)]
fn codes_map_to_statuses(#[case] code: ErrorCode, #[case] status: StatusCode) {
    assert_eq!(status_for(code), status);
    assert_eq!(status_for_raw(i64::from(code.as_raw())), status);
}

#[rstest]
#[case(0)]
#[case(7)]
#[case(-1)]
#[case(i64::MAX)]
fn unknown_raw_codes_are_internal_errors(#[case] raw: i64) {
    assert_eq!(status_for_raw(raw), StatusCode::INTERNAL_SERVER_ERROR);
}

async fn body_of(error: &Error) -> (StatusCode, ErrorBody) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body deserialises");
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn payloads_are_rendered_as_data() {
    let (status, body) = body_of(&Error::invalid(USER_INVALID, ["username"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, ErrorCode::Invalid);
    assert_eq!(body.layer, "service");
    assert_eq!(body.message, USER_INVALID.message());
    assert_eq!(
        body.data,
        Some(ErrorPayload::Invalid {
            fields: vec!["username".to_owned()]
        })
    );
}

#[rstest]
#[case(Error::not_found(USER_NOT_FOUND, "1"), StatusCode::NOT_FOUND)]
#[case(Error::duplicated(DEVICE_NAME_DUPLICATED, ["edge"]), StatusCode::CONFLICT)]
#[case(Error::limit(MAX_TAG_REACHED, 3), StatusCode::FORBIDDEN)]
#[case(Error::new(PAYMENT_REQUIRED), StatusCode::PAYMENT_REQUIRED)]
#[actix_web::test]
async fn responses_use_the_head_code(#[case] error: Error, #[case] expected: StatusCode) {
    let (status, body) = body_of(&error).await;
    assert_eq!(status, expected);
    assert_eq!(body.code, error.code());
    assert_eq!(body.data.as_ref(), error.payload());
}

#[rstest]
#[actix_web::test]
async fn store_failures_are_redacted() {
    let error = Error::from(StoreError::connection("10.0.0.7:27017 refused"));

    let (status, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.code, ErrorCode::Store);
    assert_eq!(body.message, REDACTED_MESSAGE);
    assert!(body.data.is_none());
}

#[rstest]
fn wrapped_store_absence_reports_the_outer_sentinel() {
    let error = Error::not_found(USER_NOT_FOUND, "9").wrap(StoreError::not_found("9"));
    let body = ErrorBody::from(&error);
    assert_eq!(body.message, USER_NOT_FOUND.message());
    assert_eq!(body.layer, "service");
}
