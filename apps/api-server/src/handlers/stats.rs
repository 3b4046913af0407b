//! Aggregate statistics handlers.

use actix_web::{HttpResponse, web};

use postboard_shared::ApiResponse;
use postboard_shared::dto::AuthorCountResponse;

use super::views;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts/stats
pub async fn statistics(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.posts.compute_statistics().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::statistics(stats))))
}

/// GET /api/posts/stats/most-liked
pub async fn most_liked(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let post = state.posts.most_liked_post().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::post(post))))
}

/// GET /api/posts/stats/most-disliked
pub async fn most_disliked(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let post = state.posts.most_disliked_post().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::post(post))))
}

/// GET /api/posts/stats/authors
pub async fn unique_authors(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let unique_authors = state.posts.unique_author_count().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(AuthorCountResponse { unique_authors })))
}
