//! Like / dislike handlers.

use actix_web::{HttpResponse, web};

use postboard_shared::ApiResponse;
use postboard_shared::dto::{DislikesResponse, LikesResponse, ReactionResponse};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{id}/like
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let likes = state.posts.like_post(&id, &identity.principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(LikesResponse { likes })))
}

/// DELETE /api/posts/{id}/like
pub async fn unlike(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let likes = state.posts.unlike_post(&id, &identity.principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(LikesResponse { likes })))
}

/// POST /api/posts/{id}/dislike
pub async fn dislike(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let dislikes = state.posts.dislike_post(&id, &identity.principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DislikesResponse { dislikes })))
}

/// DELETE /api/posts/{id}/dislike
pub async fn undislike(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let dislikes = state.posts.undislike_post(&id, &identity.principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DislikesResponse { dislikes })))
}

/// GET /api/posts/{id}/reaction
pub async fn reaction(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let reaction = state.posts.reaction_of(&id, &identity.principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(ReactionResponse {
        reaction: views::reaction(reaction),
    })))
}
