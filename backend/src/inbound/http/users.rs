//! Account API handlers.
//!
//! ```text
//! PATCH /api/v1/users/{id}/data     {"name":"Alice","username":"alice","email":"a@x.com"}
//! PATCH /api/v1/users/{id}/password {"current_password":"...","new_password":"..."}
//! ```

use actix_web::{HttpResponse, patch, web};
use serde::Deserialize;

use super::ApiResult;
use super::responses::updated;
use super::state::HttpState;
use crate::domain::{PlainSecret, ResourceId, UserData};

/// Body of `PATCH /users/{id}/password`.
#[derive(Debug, Deserialize)]
pub struct PasswordChangeRequest {
    pub current_password: PlainSecret,
    pub new_password: PlainSecret,
}

/// Replace an account's profile fields.
///
/// Invalid or duplicated fields respond with `400`/`409` and the list of
/// offending field names.
#[patch("/users/{id}/data")]
pub async fn update_user_data(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<UserData>,
) -> ApiResult<HttpResponse> {
    let id = ResourceId::new(id.into_inner());
    let outcome = state.accounts.update_data(&id, payload.into_inner()).await;
    updated(outcome, |_| HttpResponse::Ok().finish())
}

/// Change an account's password.
#[patch("/users/{id}/password")]
pub async fn update_user_password(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<PasswordChangeRequest>,
) -> ApiResult<HttpResponse> {
    let id = ResourceId::new(id.into_inner());
    let PasswordChangeRequest {
        current_password,
        new_password,
    } = payload.into_inner();
    state
        .accounts
        .update_password(&id, &current_password, &new_password)
        .await?;
    Ok(HttpResponse::Ok().finish())
}
