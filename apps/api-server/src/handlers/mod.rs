//! HTTP handlers and route configuration.

mod blog_posts;
mod comments;
mod health;
mod subscribers;

use actix_web::{error, web};

use crate::middleware::error::AppError;

/// Path config that turns an unparseable id into a 404 for `entity`.
fn not_found_on_bad_id(entity: &'static str) -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(move |_, _| AppError::NotFound(format!("{} not found", entity)).into())
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _| {
        let detail = match &err {
            error::JsonPayloadError::ContentType => "Expected a JSON body".to_string(),
            other => other.to_string(),
        };
        AppError::BadRequest(detail).into()
    })
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/blogPosts")
                    .app_data(not_found_on_bad_id("Blog post"))
                    .route("", web::get().to(blog_posts::list_posts))
                    .route("", web::post().to(blog_posts::create_post))
                    // Literal segments must come before `/{id}`.
                    .route("/recent", web::get().to(blog_posts::recent_posts))
                    .route("/others", web::get().to(blog_posts::other_posts))
                    .route("/{id}", web::get().to(blog_posts::get_post))
                    .route("/{id}", web::put().to(blog_posts::update_post))
                    .route("/{id}", web::delete().to(blog_posts::delete_post))
                    .route("/{id}/comments", web::get().to(comments::list_comments))
                    .route("/{id}/comments", web::post().to(comments::create_comment))
                    .route(
                        "/{id}/send-newsletter",
                        web::post().to(blog_posts::send_newsletter),
                    )
                    .route("/{id}/post-twitter", web::post().to(blog_posts::post_twitter))
                    .route("/{id}/post-linkedin", web::post().to(blog_posts::post_linkedin))
                    .route("/{id}/post-facebook", web::post().to(blog_posts::post_facebook)),
            )
            .service(
                web::scope("/comments")
                    .app_data(not_found_on_bad_id("Comment"))
                    .route("/{id}", web::delete().to(comments::delete_comment)),
            )
            .service(
                web::scope("/subscribers")
                    .route("", web::get().to(subscribers::list_subscribers))
                    .route("", web::post().to(subscribers::subscribe))
                    .route("/{email}", web::delete().to(subscribers::unsubscribe)),
            ),
    );
}
