//! Mock management API for local development — serves sample manufacturing lists.
//!
//! Usage: `cargo run --bin mock-upstream`
//!
//! Listens on `MOCK_UPSTREAM_PORT` (default 8000) and answers
//! `/api/{machine,material,workshop,department}/` the way the real API does.
//! Prints one access token per role, signed with `JWT_SECRET` (reads .env).

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use millboard::models::user::{UserProfile, UserRole};
use millboard::services::auth::issue_access_token;

const TOKEN_EXPIRY_SECS: i64 = 8 * 60 * 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).compact().init();

    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let port: u16 = std::env::var("MOCK_UPSTREAM_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()
        .unwrap_or(8000);

    println!("=== millboard mock upstream ===");
    let roles = [
        (1, "admin", UserRole::Admin),
        (2, "manager", UserRole::Manager),
        (3, "supervisor", UserRole::Supervisor),
        (4, "operator", UserRole::Operator),
        (5, "technician", UserRole::Technician),
        (6, "purchasing", UserRole::Purchasing),
    ];
    for (id, username, role) in roles {
        let profile = UserProfile {
            id,
            username: username.to_string(),
            name: Some(format!("Demo {}", role.label().to_lowercase())),
            role: Some(role),
        };
        let token = issue_access_token(&profile, &secret, TOKEN_EXPIRY_SECS)?;
        println!("{username:>11}: {token}");
    }

    let app = Router::new()
        .route("/api/", get(|| async { Json(json!({ "status": "ok" })) }))
        .route("/api/machine/", get(|h: HeaderMap| async move { guarded(&h, machines()) }))
        .route("/api/material/", get(|h: HeaderMap| async move { guarded(&h, materials()) }))
        .route("/api/workshop/", get(|h: HeaderMap| async move { guarded(&h, workshops()) }))
        .route("/api/department/", get(|h: HeaderMap| async move { guarded(&h, departments()) }));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tracing::info!("Mock upstream listening on http://127.0.0.1:{port}/api");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Reject requests without a bearer token, like the real API.
fn guarded(headers: &HeaderMap, body: Value) -> axum::response::Response {
    let authorized = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "));
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Authentication credentials were not provided." })),
        )
            .into_response();
    }
    Json(body).into_response()
}

fn machines() -> Value {
    json!([
        { "id": 1, "name": "CNC Lathe A", "workshop": 1, "status": "OPERATIONAL", "operator": 4, "next_maintenance_date": "2030-01-15" },
        { "id": 2, "name": "Hydraulic Press", "workshop": 1, "status": "IDLE", "operator": null, "next_maintenance_date": "2024-01-10" },
        { "id": 3, "name": "Laser Cutter", "workshop": 2, "status": "MAINTENANCE", "operator": null, "next_maintenance_date": null },
        { "id": 4, "name": "Welding Robot", "workshop": 2, "status": "BROKEN", "operator": null, "next_maintenance_date": "2024-03-01" },
        { "id": 5, "name": "Paint Booth", "workshop": 3, "status": "OPERATIONAL", "operator": null, "next_maintenance_date": "2031-06-30" }
    ])
}

fn materials() -> Value {
    json!([
        { "id": 1, "name": "Steel Sheet 2mm", "unit_of_measurement": "sheet", "quantity": "120.00", "reorder_level": "50.00" },
        { "id": 2, "name": "Aluminium Rod", "unit_of_measurement": "m", "quantity": "18.50", "reorder_level": "25.00" },
        { "id": 3, "name": "Welding Wire", "unit_of_measurement": "kg", "quantity": "0.00", "reorder_level": "10.00" },
        { "id": 4, "name": "Primer Paint", "unit_of_measurement": "l", "quantity": "42.00", "reorder_level": "0.00" }
    ])
}

fn workshops() -> Value {
    json!([
        { "id": 1, "name": "Machining", "department": 1, "operational_status": "ACTIVE" },
        { "id": 2, "name": "Fabrication", "department": 1, "operational_status": "MAINTENANCE" },
        { "id": 3, "name": "Finishing", "department": 2, "operational_status": "INACTIVE" }
    ])
}

fn departments() -> Value {
    json!([
        { "id": 1, "name": "Production", "supervisor": 3 },
        { "id": 2, "name": "Surface Treatment", "supervisor": null }
    ])
}
