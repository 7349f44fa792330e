//! Comment handlers

use axum::{extract::State, Json};
use campus_service::dto::{CommentRequest, CommentResponse};
use campus_service::CommentService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /events/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service.list_comments(&auth.principal, event_id).await?;
    Ok(Json(response))
}

/// POST /events/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath,
    ValidatedJson(request): ValidatedJson<CommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .add_comment(&auth.principal, event_id, &request.content)
        .await?;
    Ok(Created(Json(response)))
}

/// Only the author may edit
///
/// PATCH /comments/{id}
pub async fn edit_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
    ValidatedJson(request): ValidatedJson<CommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .edit_comment(&auth.principal, comment_id, &request.content)
        .await?;
    Ok(Json(response))
}

/// DELETE /comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service.delete_comment(&auth.principal, comment_id).await?;
    Ok(NoContent)
}
