//! Root endpoint listing what the service exposes.

use axum::{Json, Router, routing::get};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub endpoints: Vec<&'static str>,
}

const ENDPOINTS: [&str; 6] = [
    "GET /health",
    "GET /api/users",
    "POST /api/users",
    "GET /api/users/{id}",
    "PUT /api/users/{id}",
    "DELETE /api/users/{id}",
];

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Users API",
        endpoints: ENDPOINTS.to_vec(),
    })
}

/// `GET /`
pub fn router() -> Router {
    Router::new().route("/", get(index))
}
