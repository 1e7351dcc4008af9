//! Blog post handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Channel;
use quill_shared::MessageResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::upload::PostForm;

/// POST /api/blogPosts
pub async fn create_post(state: web::Data<AppState>, payload: Multipart) -> AppResult<HttpResponse> {
    let form = PostForm::from_multipart(payload).await?;
    let (mut input, upload) = form.into_new_post()?;

    if let Some(upload) = upload {
        input.image = Some(upload.store(state.images.as_ref()).await?);
    }

    let post = state.blog.create(input).await?;
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/blogPosts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.blog.list().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/blogPosts/recent
pub async fn recent_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.blog.recent().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/blogPosts/others
pub async fn other_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.blog.others().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/blogPosts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.blog.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/blogPosts/{id}
///
/// The stored image is replaced only when the request carries a new file.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = PostForm::from_multipart(payload).await?;
    let (mut changes, upload) = form.into_changes()?;

    // Unknown ids fail before anything is written to disk.
    state.blog.ensure_exists(id).await?;

    if let Some(upload) = upload {
        changes.image = Some(upload.store(state.images.as_ref()).await?);
    }

    let post = state.blog.update(id, changes).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/blogPosts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.blog.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Blog post deleted")))
}

async fn fan_out(state: &AppState, id: Uuid, channel: Channel) -> AppResult<HttpResponse> {
    state.blog.fan_out(id, channel).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(channel.success_message())))
}

/// POST /api/blogPosts/{id}/send-newsletter
pub async fn send_newsletter(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    fan_out(&state, path.into_inner(), Channel::Newsletter).await
}

/// POST /api/blogPosts/{id}/post-twitter
pub async fn post_twitter(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    fan_out(&state, path.into_inner(), Channel::Twitter).await
}

/// POST /api/blogPosts/{id}/post-linkedin
pub async fn post_linkedin(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    fan_out(&state, path.into_inner(), Channel::LinkedIn).await
}

/// POST /api/blogPosts/{id}/post-facebook
pub async fn post_facebook(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    fan_out(&state, path.into_inner(), Channel::Facebook).await
}
