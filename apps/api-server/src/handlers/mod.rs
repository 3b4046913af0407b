//! HTTP handlers and route configuration.

mod health;
mod posts;
mod reactions;
mod stats;
mod views;


use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
///
/// Fixed `/posts/...` paths are registered before `/posts/{id}` so they are
/// not captured as ids.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route(
                "/authors/{author}/posts",
                web::get().to(posts::get_posts_by_author),
            )
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::list_posts))
                            .route(web::post().to(posts::create_post)),
                    )
                    .route("/search", web::get().to(posts::search_posts))
                    .route("/stats", web::get().to(stats::statistics))
                    .route("/stats/most-liked", web::get().to(stats::most_liked))
                    .route("/stats/most-disliked", web::get().to(stats::most_disliked))
                    .route("/stats/authors", web::get().to(stats::unique_authors))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(posts::get_post))
                            .route(web::put().to(posts::update_post))
                            .route(web::delete().to(posts::delete_post)),
                    )
                    .route("/{id}/comments", web::post().to(posts::add_comment))
                    .service(
                        web::resource("/{id}/like")
                            .route(web::post().to(reactions::like))
                            .route(web::delete().to(reactions::unlike)),
                    )
                    .service(
                        web::resource("/{id}/dislike")
                            .route(web::post().to(reactions::dislike))
                            .route(web::delete().to(reactions::undislike)),
                    )
                    .route("/{id}/reaction", web::get().to(reactions::reaction)),
            ),
    );
}
