//! End-to-end tests for the dashboard API against a fake management API.
//!
//! Both servers bind random local ports; no external services are needed.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode as AxumStatus};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use millboard::config::AppConfig;
use millboard::models::user::{UserProfile, UserRole};
use millboard::services::auth::issue_access_token;
use millboard::AppState;

const JWT_SECRET: &str = "test-jwt-secret-for-integration-tests-only";

/// How the fake upstream should misbehave.
#[derive(Clone, Copy, Default)]
struct Faults {
    machines_down: bool,
    workshops_down: bool,
    departments_slow: bool,
    departments_paginated: bool,
}

fn upstream_router(faults: Faults) -> Router {
    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("Bearer "))
    }

    fn respond(headers: HeaderMap, down: bool, body: Value) -> axum::response::Response {
        if !authorized(&headers) {
            return AxumStatus::UNAUTHORIZED.into_response();
        }
        if down {
            return (AxumStatus::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
        }
        Json(body).into_response()
    }

    Router::new()
        .route(
            "/api/machine/",
            get(move |h: HeaderMap| async move {
                respond(
                    h,
                    faults.machines_down,
                    json!([
                        { "id": 1, "name": "Lathe", "status": "Operational", "operator": 42, "next_maintenance_date": "2000-01-01" },
                        { "id": 2, "name": "Press", "status": "broke down", "operator": null, "next_maintenance_date": "2999-01-01" },
                        { "id": 3, "name": "Drill", "status": "idle", "operator": null, "next_maintenance_date": null }
                    ]),
                )
            }),
        )
        .route(
            "/api/material/",
            get(|h: HeaderMap| async move {
                respond(
                    h,
                    false,
                    json!([
                        { "id": 1, "name": "Bolts", "quantity": "0", "reorder_level": "10" },
                        { "id": 2, "name": "Nuts", "quantity": "5", "reorder_level": "10" },
                        { "id": 3, "name": "Sheet", "quantity": "20", "reorder_level": "10" }
                    ]),
                )
            }),
        )
        .route(
            "/api/workshop/",
            get(move |h: HeaderMap| async move {
                respond(
                    h,
                    faults.workshops_down,
                    json!([
                        { "id": 1, "name": "Machining", "operational_status": "ACTIVE" },
                        { "id": 2, "name": "Finishing", "operational_status": "INACTIVE" }
                    ]),
                )
            }),
        )
        .route(
            "/api/department/",
            get(move |h: HeaderMap| async move {
                if faults.departments_slow {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                }
                let departments = json!([
                    { "id": 1, "name": "Production", "supervisor": 9 },
                    { "id": 2, "name": "Quality", "supervisor": null }
                ]);
                let body = if faults.departments_paginated {
                    json!({ "count": 2, "next": null, "results": departments })
                } else {
                    departments
                };
                respond(h, false, body)
            }),
        )
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}")
}

fn config(upstream: &str) -> AppConfig {
    AppConfig {
        upstream_api_url: format!("{upstream}/api"),
        upstream_timeout_secs: 10,
        dashboard_timeout_secs: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: JWT_SECRET.to_string(),
        frontend_url: "http://localhost:5173".to_string(),
    }
}

/// Start the fake upstream and the dashboard server; return the dashboard base URL.
async fn start(faults: Faults) -> String {
    let upstream = spawn(upstream_router(faults)).await;
    let state = AppState::new(config(&upstream)).expect("state");
    spawn(millboard::routes::router(state)).await
}

fn token_for(id: i64, role: Option<UserRole>) -> String {
    let profile = UserProfile {
        id,
        username: format!("user{id}"),
        name: Some("Test User".to_string()),
        role,
    };
    issue_access_token(&profile, JWT_SECRET, 900).expect("token")
}

/// Helper: extract `data` from the API envelope, panic with message on error.
fn extract_data(body: &Value) -> &Value {
    if let Some(err) = body.get("error").filter(|e| !e.is_null()) {
        panic!(
            "API error: {} — {}",
            err["code"].as_str().unwrap_or("?"),
            err["message"].as_str().unwrap_or("?"),
        );
    }
    body.get("data").expect("missing 'data' field")
}

async fn get_json(base: &str, path: &str, token: &str) -> (StatusCode, Value) {
    let resp = Client::new()
        .get(format!("{base}{path}"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    let status = resp.status();
    let body: Value = resp.json().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn admin_stats_are_aggregated() {
    let base = start(Faults::default()).await;
    let (status, body) = get_json(&base, "/api/v1/dashboard/stats", &token_for(1, Some(UserRole::Admin))).await;
    assert_eq!(status, StatusCode::OK);

    let data = extract_data(&body);
    let machines = &data["summary"]["machines"];
    assert_eq!(machines["total"], 3);
    assert_eq!(machines["operational"], 1);
    assert_eq!(machines["broken"], 1);
    assert_eq!(machines["idle"], 1);
    assert_eq!(machines["maintenance_due"], 1);

    let materials = &data["summary"]["materials"];
    assert_eq!(materials["out_of_stock"], 1);
    assert_eq!(materials["low_stock"], 1);
    assert_eq!(materials["in_stock"], 2);

    assert_eq!(data["summary"]["workshops"]["active"], 1);
    assert_eq!(data["summary"]["departments"]["without_supervisor"], 1);
    assert_eq!(data["status"], "complete");
    assert_eq!(data["stock_chart"]["datasets"][0]["data"], json!([2, 1, 1]));
    assert!(data["assigned_machine"].is_null());
}

#[tokio::test]
async fn machine_failure_is_core_failure() {
    let base = start(Faults {
        machines_down: true,
        ..Faults::default()
    })
    .await;
    let (_, body) = get_json(&base, "/api/v1/dashboard/stats", &token_for(1, Some(UserRole::Manager))).await;
    let data = extract_data(&body);

    assert_eq!(data["summary"]["machines"]["total"], 0);
    assert_eq!(data["summary"]["materials"]["total"], 3);
    assert_eq!(data["status"], "core_data_failure");
    assert_eq!(data["failed_resources"], json!(["machines"]));
}

#[tokio::test]
async fn peripheral_failure_is_a_warning_on_the_view() {
    let base = start(Faults {
        workshops_down: true,
        ..Faults::default()
    })
    .await;
    let (_, body) = get_json(&base, "/api/v1/dashboard", &token_for(1, Some(UserRole::Admin))).await;
    let view = extract_data(&body);

    assert_eq!(view["notice"]["severity"], "warning");
    assert_eq!(view["notice"]["message"], "Some dashboard data failed to load.");
    assert_eq!(view["stat_cards"][1]["value"], 0);
    assert_eq!(view["stat_cards"][0]["value"], 3);
}

#[tokio::test]
async fn paginated_envelope_fails_only_that_collection() {
    let base = start(Faults {
        departments_paginated: true,
        ..Faults::default()
    })
    .await;
    let (_, body) = get_json(&base, "/api/v1/dashboard/stats", &token_for(1, Some(UserRole::Admin))).await;
    let data = extract_data(&body);

    assert_eq!(data["status"], "partial_failure");
    assert_eq!(data["failed_resources"], json!(["departments"]));
    assert_eq!(data["summary"]["departments"]["total"], 0);
    assert_eq!(data["summary"]["machines"]["total"], 3);
}

#[tokio::test]
async fn string_operator_ids_keep_the_machine_list() {
    let upstream = spawn(Router::new().route(
        "/api/machine/",
        get(|| async {
            Json(json!([
                { "id": 1, "status": "OPERATIONAL" },
                { "id": 2, "status": "IDLE", "operator": "7" }
            ]))
        }),
    ))
    .await;
    let state = AppState::new(config(&upstream)).expect("state");
    let base = spawn(millboard::routes::router(state)).await;

    let (_, body) = get_json(&base, "/api/v1/dashboard/stats", &token_for(7, Some(UserRole::Manager))).await;
    let data = extract_data(&body);
    assert_eq!(data["summary"]["machines"]["total"], 2);
    assert_eq!(data["summary"]["machines"]["idle"], 1);
    // The other three collections 404 on this upstream.
    assert_eq!(data["failed_resources"], json!(["materials", "workshops", "departments"]));
}

#[tokio::test]
async fn readiness_reflects_upstream() {
    let base = start(Faults::default()).await;
    let body: Value = Client::new()
        .get(format!("{base}/health/ready"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(extract_data(&body)["status"], "ok");

    // Nothing listens on a port we just released.
    let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = closed.local_addr().unwrap();
    drop(closed);
    let state = AppState::new(config(&format!("http://{addr}"))).unwrap();
    let response = millboard::routes::router(state)
        .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"]["status"], "degraded");
}

#[tokio::test]
async fn batch_timeout_resets_everything() {
    let base = start(Faults {
        departments_slow: true,
        ..Faults::default()
    })
    .await;
    let (_, body) = get_json(&base, "/api/v1/dashboard/stats", &token_for(1, Some(UserRole::Admin))).await;
    let data = extract_data(&body);

    assert_eq!(data["status"], "failed");
    assert_eq!(data["summary"]["machines"]["total"], 0);
    assert_eq!(data["summary"]["materials"]["total"], 0);
    assert!(data["stock_chart"].is_null());
}

#[tokio::test]
async fn operator_sees_assigned_machine() {
    let base = start(Faults::default()).await;
    let (_, body) = get_json(&base, "/api/v1/dashboard", &token_for(42, Some(UserRole::Operator))).await;
    let view = extract_data(&body);

    assert!(view["stat_cards"].as_array().unwrap().is_empty());
    assert!(view["chart"].is_null());
    let panel = &view["panels"][0];
    assert_eq!(panel["title"], "Your Assigned Machine");
    assert_eq!(panel["links"][0]["label"], "Lathe");
    assert_eq!(panel["links"][0]["href"], "/machines/1");
}

#[tokio::test]
async fn technician_is_forbidden_from_stats_but_gets_alert() {
    let base = start(Faults::default()).await;
    let token = token_for(5, Some(UserRole::Technician));

    let (status, body) = get_json(&base, "/api/v1/dashboard/stats", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (_, body) = get_json(&base, "/api/v1/dashboard", &token).await;
    let view = extract_data(&body);
    assert_eq!(view["alerts"][0]["items"][0]["label"], "1 machine(s) need maintenance.");
}

#[tokio::test]
async fn purchasing_can_read_stock_chart() {
    let base = start(Faults::default()).await;
    let (status, body) =
        get_json(&base, "/api/v1/dashboard/stock-chart", &token_for(6, Some(UserRole::Purchasing))).await;
    assert_eq!(status, StatusCode::OK);
    let chart = extract_data(&body);
    assert_eq!(chart["labels"], json!(["In Stock", "Low Stock", "Out of Stock"]));
}

#[tokio::test]
async fn user_without_role_gets_empty_view() {
    let base = start(Faults {
        machines_down: true,
        ..Faults::default()
    })
    .await;
    let (_, body) = get_json(&base, "/api/v1/dashboard", &token_for(3, None)).await;
    let view = extract_data(&body);

    // No fetch happened, so the failing upstream produced no notice.
    assert!(view["notice"].is_null());
    assert!(view["role"].is_null());
    assert!(view["panels"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn me_reports_token_identity() {
    let base = start(Faults::default()).await;
    let (_, body) = get_json(&base, "/api/v1/auth/me", &token_for(7, Some(UserRole::Supervisor))).await;
    let me = extract_data(&body);
    assert_eq!(me["id"], 7);
    assert_eq!(me["role"], "SUPERVISOR");
}

#[tokio::test]
async fn requests_without_token_are_rejected() {
    let state = AppState::new(config("http://127.0.0.1:9")).unwrap();
    let app = millboard::routes::router(state);

    let response = app
        .clone()
        .oneshot(Request::get("/api/v1/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), AxumStatus::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::get("/api/v1/dashboard")
                .header("Authorization", "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), AxumStatus::UNAUTHORIZED);
}

#[tokio::test]
async fn liveness_and_unknown_routes() {
    let state = AppState::new(config("http://127.0.0.1:9")).unwrap();
    let app = millboard::routes::router(state);

    let live = tokio_test::assert_ok!(
        app.clone()
            .oneshot(Request::get("/health/live").body(Body::empty()).unwrap())
            .await
    );
    assert_eq!(live.status(), AxumStatus::OK);

    let missing = tokio_test::assert_ok!(
        app.oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
    );
    assert_eq!(missing.status(), AxumStatus::NOT_FOUND);
}
