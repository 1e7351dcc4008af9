//! Comment handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_shared::MessageResponse;
use quill_shared::dto::CreateCommentRequest;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/blogPosts/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments = state.blog.comments(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/blogPosts/{id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let comment = state
        .blog
        .add_comment(path.into_inner(), req.author, req.content)
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.blog.delete_comment(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Comment deleted")))
}
