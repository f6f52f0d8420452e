//! Shared test helpers: an in-process mock of the admin API and JSON fixtures.

use axum::Router;

/// Serve `router` on an ephemeral port and return its `/api` base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

/// Base URL of a port nothing listens on
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

pub fn user_json(id: u64, name: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "surname": null,
        "birthdate": "1990-04-12",
        "gender": null,
        "height": 175,
        "weight": 70.5,
        "email": email,
        "email_verified_at": "2024-01-01T10:05:00.000000Z",
        "created_at": "2024-01-01T10:00:00.000000Z",
        "updated_at": "2024-01-01T10:00:00.000000Z",
        "activities_count": 2
    })
}

pub fn activity_json(id: u64, user_id: u64, kind: &str, distance: f64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "user_id": user_id,
        "title": format!("Activity {}", id),
        "note": null,
        "activity_type": kind,
        "distance": distance,
        "time": 1800,
        "pace": 5.5,
        "speed": 10.9,
        "created_at": "2024-05-01T06:00:00.000000Z",
        "updated_at": "2024-05-01T06:00:00.000000Z",
        "user": user_json(user_id, "Owner", "owner@example.com")
    })
}
