//! Response builders shared by resource handlers.

use actix_web::HttpResponse;
use pagination::Page;
use serde::Serialize;

use super::ApiResult;
use super::error::status_for;
use crate::domain::UpdateOutcome;

/// Header carrying the full match count of a paginated listing.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// `200 OK` with the page items as the body and the total in
/// [`TOTAL_COUNT_HEADER`].
pub fn paged<T: Serialize>(page: Page<T>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((TOTAL_COUNT_HEADER, page.total_count.to_string()))
        .json(page.items)
}

/// Render an update outcome.
///
/// Rejections that name fields (invalid or duplicated) respond with the bare
/// field list so clients can highlight every offending input at once. Other
/// failures go through the regular error body.
pub fn updated<R>(
    outcome: UpdateOutcome<R>,
    on_success: impl FnOnce(R) -> HttpResponse,
) -> ApiResult<HttpResponse> {
    let UpdateOutcome { fields, result } = outcome;
    match result {
        Ok(resource) => Ok(on_success(resource)),
        Err(err) if !fields.is_empty() => Ok(HttpResponse::build(status_for(err.code())).json(fields)),
        Err(err) => Err(err),
    }
}
