//! Post and comment handlers.

use actix_web::{HttpResponse, web};

use postboard_core::domain::{PostPayload, Principal};
use postboard_shared::ApiResponse;
use postboard_shared::dto::{CommentRequest, PostRequest, SearchQuery};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn payload(req: PostRequest) -> PostPayload {
    PostPayload {
        title: req.title,
        content: req.content,
        image: req.image,
    }
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_posts().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::posts(posts))))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::post(post))))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .create_post(payload(body.into_inner()), &identity.principal)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(views::post(post))))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update_post(&id, payload(body.into_inner()), &identity.principal)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::post(post))))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.delete_post(&id, &identity.principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        views::post(post),
        "Post deleted",
    )))
}

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .posts
        .add_comment(&id, body.into_inner().content, &identity.principal)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(views::comment(comment))))
}

/// GET /api/authors/{author}/posts
pub async fn get_posts_by_author(
    state: web::Data<AppState>,
    author: web::Path<String>,
) -> AppResult<HttpResponse> {
    let author = Principal::new(author.into_inner());
    let posts = state.posts.get_posts_by_author(&author).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::posts(posts))))
}

/// GET /api/posts/search?term=
pub async fn search_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.search_posts(&query.term).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::posts(posts))))
}
