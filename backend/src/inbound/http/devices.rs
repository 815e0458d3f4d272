//! Device API handlers.
//!
//! ```text
//! GET    /api/v1/devices?page=1&per_page=10
//! GET    /api/v1/devices/{id}
//! PATCH  /api/v1/devices/{id} {"name":"edge-01","tags":["prod"]}
//! DELETE /api/v1/devices/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, web};
use pagination::PageQuery;

use super::ApiResult;
use super::responses::{paged, updated};
use super::state::HttpState;
use crate::domain::{Device, DevicePatch, ResourceId};

#[get("/devices")]
pub async fn list_devices(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state.devices.list(query.into_inner()).await?;
    Ok(paged(page))
}

#[get("/devices/{id}")]
pub async fn get_device(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Device>> {
    let device = state.devices.get(&ResourceId::new(id.into_inner())).await?;
    Ok(web::Json(device))
}

/// Rename or retag a device. Omitted fields are left unchanged; more than
/// three distinct tags is rejected with `403`.
#[patch("/devices/{id}")]
pub async fn update_device(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<DevicePatch>,
) -> ApiResult<HttpResponse> {
    let id = ResourceId::new(id.into_inner());
    let outcome = state.devices.update(&id, payload.into_inner()).await;
    updated(outcome, |device| HttpResponse::Ok().json(device))
}

#[delete("/devices/{id}")]
pub async fn delete_device(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .devices
        .delete(&ResourceId::new(id.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().finish())
}
