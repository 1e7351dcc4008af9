//! Newsletter subscriber handlers.

use actix_web::{HttpResponse, web};

use quill_shared::MessageResponse;
use quill_shared::dto::SubscribeRequest;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/subscribers
pub async fn subscribe(
    state: web::Data<AppState>,
    body: web::Json<SubscribeRequest>,
) -> AppResult<HttpResponse> {
    let subscriber = state.subscribers.subscribe(&body.email).await?;
    Ok(HttpResponse::Created().json(subscriber))
}

/// GET /api/subscribers
pub async fn list_subscribers(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let subscribers = state.subscribers.list().await?;
    Ok(HttpResponse::Ok().json(subscribers))
}

/// DELETE /api/subscribers/{email}
pub async fn unsubscribe(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.subscribers.unsubscribe(&path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Unsubscribed")))
}
