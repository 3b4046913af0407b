//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<usize>,
}

/// Health check endpoint - reports `degraded` when the post store is unreachable.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let posts = match state.posts.count_posts().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Post store unavailable");
            None
        }
    };

    let response = HealthResponse {
        status: if posts.is_some() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        posts,
    };

    match response.posts {
        Some(_) => HttpResponse::Ok().json(response),
        None => HttpResponse::ServiceUnavailable().json(response),
    }
}
