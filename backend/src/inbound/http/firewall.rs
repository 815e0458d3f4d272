//! Firewall rule API handlers.
//!
//! ```text
//! GET    /api/v1/firewall/rules?page=1&per_page=10
//! GET    /api/v1/firewall/rules/{id}
//! PUT    /api/v1/firewall/rules/{id}
//! DELETE /api/v1/firewall/rules/{id}
//! ```

use actix_web::{HttpResponse, delete, get, put, web};
use pagination::PageQuery;

use super::ApiResult;
use super::responses::{paged, updated};
use super::state::HttpState;
use crate::domain::{FirewallRule, FirewallRulePatch, ResourceId};

/// List rules by ascending priority. The full count is returned in
/// `X-Total-Count`.
#[get("/firewall/rules")]
pub async fn list_firewall_rules(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state.firewall_rules.list(query.into_inner()).await?;
    Ok(paged(page))
}

#[get("/firewall/rules/{id}")]
pub async fn get_firewall_rule(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<FirewallRule>> {
    let rule = state
        .firewall_rules
        .get(&ResourceId::new(id.into_inner()))
        .await?;
    Ok(web::Json(rule))
}

/// Replace a rule's fields.
#[put("/firewall/rules/{id}")]
pub async fn update_firewall_rule(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<FirewallRulePatch>,
) -> ApiResult<HttpResponse> {
    let id = ResourceId::new(id.into_inner());
    let outcome = state.firewall_rules.update(&id, payload.into_inner()).await;
    updated(outcome, |rule| HttpResponse::Ok().json(rule))
}

#[delete("/firewall/rules/{id}")]
pub async fn delete_firewall_rule(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .firewall_rules
        .delete(&ResourceId::new(id.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use crate::inbound::http::responses::TOTAL_COUNT_HEADER;
    use crate::inbound::http::test_utils::{seeded_state, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn priorities(body: &Value) -> Vec<i64> {
        body.as_array()
            .expect("array body")
            .iter()
            .filter_map(|rule| rule.get("priority").and_then(Value::as_i64))
            .collect()
    }

    #[rstest]
    #[case("", vec![1, 2, 3, 4])]
    #[case("?page=-1&per_page=-1", vec![1, 2, 3, 4])]
    #[case("?page=2&per_page=2", vec![3, 4])]
    #[case("?page=1&perPage=3", vec![1, 2, 3])]
    #[case("?page=3&per_page=2", vec![])]
    #[actix_web::test]
    async fn listing_is_paginated(#[case] query: &str, #[case] expected: Vec<i64>) {
        let app = actix_test::init_service(test_app(seeded_state().await)).await;
        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/firewall/rules{query}"))
            .to_request();

        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let total = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        assert_eq!(total.as_deref(), Some("4"));
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(priorities(&body), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_validates_and_persists() {
        let app = actix_test::init_service(test_app(seeded_state().await)).await;
        let uri = "/api/v1/firewall/rules/78c96f0a2e5b4dca8d78f00c";
        let rejected = actix_test::TestRequest::put()
            .uri(uri)
            .set_json(json!({
                "priority": 0, "action": "drop", "active": true,
                "source_ip": ".*", "username": ".*"
            }))
            .to_request();
        let response = actix_test::call_service(&app, rejected).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let fields: Value = actix_test::read_body_json(response).await;
        assert_eq!(fields, json!(["priority", "action"]));

        let accepted = actix_test::TestRequest::put()
            .uri(uri)
            .set_json(json!({
                "priority": 9, "action": "DENY", "active": false,
                "source_ip": "10.0.0.0/8", "username": "root"
            }))
            .to_request();
        let response = actix_test::call_service(&app, accepted).await;
        assert_eq!(response.status(), StatusCode::OK);
        let rule: Value = actix_test::read_body_json(response).await;
        assert_eq!(rule["action"], "deny");
        assert_eq!(rule["priority"], 9);
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_then_get_is_404() {
        let app = actix_test::init_service(test_app(seeded_state().await)).await;
        let uri = "/api/v1/firewall/rules/3fd759a1ecb64ec5a07c8c0f";

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri(uri).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        for request in [
            actix_test::TestRequest::get().uri(uri).to_request(),
            actix_test::TestRequest::delete().uri(uri).to_request(),
        ] {
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }
}
