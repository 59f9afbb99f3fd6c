//! HTTP tests for the API router

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

use core_kernel::MemberId;
use interface_api::{
    auth::{create_token, permissions, ADMIN_ROLE},
    config::ApiConfig,
    create_router,
};

const SECRET: &str = "api-test-secret";

fn app() -> Router {
    create_router(ApiConfig {
        jwt_secret: SECRET.to_string(),
        ..ApiConfig::default()
    })
}

fn token(roles: &[&str]) -> String {
    create_token("user-1", roles.iter().map(|r| r.to_string()).collect(), SECRET, 300).unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post(uri: &str, roles: &[&str], body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token(roles)))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

// ============================================================================
// Health Tests
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_is_public() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready() {
        let request = Request::builder().uri("/health/ready").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }
}

// ============================================================================
// Auth Tests
// ============================================================================

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/settlements")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_bad_token_is_unauthorized() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/settlements")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::from("{}"))
            .unwrap();
        let (status, _) = send(request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_permission_is_forbidden() {
        let body = json!({ "members": [], "expenses": [] });
        let (status, body) = send(post("/api/v1/settlements", &[permissions::REPORT_READ], body)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "forbidden");
    }
}

// ============================================================================
// Settlement Tests
// ============================================================================

mod settlement_tests {
    use super::*;

    #[tokio::test]
    async fn test_single_payer_settlement() {
        let (a, b, c) = (MemberId::new(), MemberId::new(), MemberId::new());
        let body = json!({
            "currency": "PHP",
            "members": [
                { "id": a, "name": "Ana" },
                { "id": b, "name": "Ben" },
                { "id": c, "name": "", "email": "cara@example.com" }
            ],
            "expenses": [
                { "payer_id": a, "amount": "90", "description": "Groceries", "category": "food" }
            ]
        });

        let (status, body) = send(post("/api/v1/settlements", &[permissions::SETTLEMENT_COMPUTE], body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["balances"][0]["balance"]), dec!(60));
        assert_eq!(decimal(&body["balances"][1]["balance"]), dec!(-30));
        assert_eq!(body["balances"][2]["name"], "cara@example.com");

        let transfers = body["transfers"].as_array().unwrap();
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0]["to_name"], "Ana");
        assert_eq!(decimal(&transfers[0]["amount"]), dec!(30));
        assert!(body["warnings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_admin_may_compute() {
        let a = MemberId::new();
        let body = json!({ "members": [{ "id": a, "name": "Solo" }] });

        let (status, body) = send(post("/api/v1/settlements", &[ADMIN_ROLE], body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currency"], "PHP");
    }

    #[tokio::test]
    async fn test_empty_members_is_unprocessable() {
        let body = json!({ "members": [], "expenses": [] });
        let (status, body) = send(post("/api/v1/settlements", &[permissions::SETTLEMENT_COMPUTE], body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_input");
    }

    #[tokio::test]
    async fn test_unknown_payer_is_unprocessable() {
        let body = json!({
            "members": [{ "id": MemberId::new(), "name": "Ana" }],
            "expenses": [{ "payer_id": MemberId::new(), "amount": "10" }]
        });
        let (status, body) = send(post("/api/v1/settlements", &[permissions::SETTLEMENT_COMPUTE], body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_input");
    }

    #[tokio::test]
    async fn test_displayed_balances_net_to_zero() {
        let (a, b, c) = (MemberId::new(), MemberId::new(), MemberId::new());
        let body = json!({
            "members": [
                { "id": a, "name": "Ana" },
                { "id": b, "name": "Ben" },
                { "id": c, "name": "Cara" }
            ],
            "expenses": [{ "payer_id": a, "amount": "100" }]
        });

        let (status, body) = send(post("/api/v1/settlements", &[permissions::SETTLEMENT_COMPUTE], body)).await;

        assert_eq!(status, StatusCode::OK);
        let balances = body["balances"].as_array().unwrap();
        let net: Decimal = balances.iter().map(|b| decimal(&b["balance"])).sum();
        let paid: Decimal = balances.iter().map(|b| decimal(&b["total_paid"])).sum();
        assert_eq!(net, Decimal::ZERO);
        assert_eq!(paid, dec!(100));
        assert_eq!(decimal(&balances[0]["balance"]), dec!(66.67));
    }

    #[tokio::test]
    async fn test_oversized_amounts_fail_validation() {
        let (a, b) = (MemberId::new(), MemberId::new());
        let huge = (Decimal::MAX / dec!(2) + Decimal::ONE).to_string();
        let body = json!({
            "members": [{ "id": a, "name": "Ana" }, { "id": b, "name": "Ben" }],
            "expenses": [
                { "payer_id": a, "amount": huge },
                { "payer_id": b, "amount": huge }
            ]
        });

        let (status, body) = send(post("/api/v1/settlements", &[permissions::SETTLEMENT_COMPUTE], body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_bad_email_fails_validation() {
        let body = json!({
            "members": [{ "id": MemberId::new(), "name": "Ana", "email": "not-an-email" }]
        });
        let (status, body) = send(post("/api/v1/settlements", &[permissions::SETTLEMENT_COMPUTE], body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }
}

// ============================================================================
// Report and Budget Tests
// ============================================================================

mod report_tests {
    use super::*;

    #[tokio::test]
    async fn test_trends_with_forecast() {
        let payer = MemberId::new();
        let body = json!({
            "forecast_months": 1,
            "expenses": [
                { "payer_id": payer, "amount": "1000", "spent_on": "2024-01-10", "category": "food" },
                { "payer_id": payer, "amount": "1200", "spent_on": "2024-02-10", "category": "food" },
                { "payer_id": payer, "amount": "1400", "spent_on": "2024-03-10", "category": "utilities" }
            ]
        });

        let (status, body) = send(post("/api/v1/reports/trends", &[permissions::REPORT_READ], body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["monthly_totals"].as_array().unwrap().len(), 3);
        assert_eq!(body["categories"][0]["category"], "food");
        assert_eq!(body["forecast"]["predictions"][0]["month"], "2024-04");
    }

    #[tokio::test]
    async fn test_trends_require_dates() {
        let body = json!({
            "expenses": [{ "payer_id": MemberId::new(), "amount": "10" }]
        });
        let (status, _) = send(post("/api/v1/reports/trends", &[permissions::REPORT_READ], body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_budget_near_limit() {
        let member = MemberId::new();
        let body = json!({
            "scope": { "kind": "member", "id": member },
            "limit": "1000",
            "period": "2024-05",
            "expenses": [
                { "payer_id": member, "amount": "850", "spent_on": "2024-05-12" }
            ]
        });

        let (status, body) = send(post("/api/v1/budgets/evaluate", &[permissions::BUDGET_READ], body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "near_limit");
        assert_eq!(body["expense_count"], 1);
    }

    #[tokio::test]
    async fn test_budget_rejects_oversized_limit() {
        let body = json!({
            "scope": { "kind": "member", "id": MemberId::new() },
            "limit": "1000000000000.01",
            "period": "2024-05",
            "expenses": []
        });

        let (status, body) = send(post("/api/v1/budgets/evaluate", &[permissions::BUDGET_READ], body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_budget_rejects_non_positive_limit() {
        let body = json!({
            "scope": { "kind": "member", "id": MemberId::new() },
            "limit": "0",
            "period": "2024-05",
            "expenses": []
        });

        let (status, _) = send(post("/api/v1/budgets/evaluate", &[permissions::BUDGET_READ], body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
