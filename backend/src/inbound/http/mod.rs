//! HTTP inbound adapter exposing the account, firewall rule, and device
//! REST endpoints.
//!
//! Handlers only see driving ports through [`state::HttpState`]; domain
//! failures become responses through the [`error`] status mapper.

pub mod devices;
pub mod error;
pub mod firewall;
pub mod responses;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::{error::InternalError, web};
use tracing::debug;

use crate::domain::{Error, sentinels::BAD_REQUEST};

/// Body and query extraction failures answer with the `bad_request` error
/// body instead of actix's plain-text default.
fn bad_request(reason: &dyn std::fmt::Display) -> actix_web::Error {
    debug!(%reason, "rejected malformed request");
    let err = Error::new(BAD_REQUEST);
    let response = actix_web::ResponseError::error_response(&err);
    InternalError::from_response(err, response).into()
}

/// Register every handler and the extractor error handlers.
///
/// Mount inside a scope, e.g. `web::scope("/api/v1").configure(configure)`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(&err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(&err)))
        .app_data(web::PathConfig::default().error_handler(|err, _| bad_request(&err)))
        .service(users::update_user_data)
        .service(users::update_user_password)
        .service(firewall::list_firewall_rules)
        .service(firewall::get_firewall_rule)
        .service(firewall::update_firewall_rule)
        .service(firewall::delete_firewall_rule)
        .service(devices::list_devices)
        .service(devices::get_device)
        .service(devices::update_device)
        .service(devices::delete_device);
}
