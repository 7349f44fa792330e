//! Rating handlers
//!
//! Each caller owns at most one rating per event; the write routes always act
//! on the caller's own rating.

use axum::{extract::State, Json};
use campus_service::dto::{RatingListResponse, RatingRequest, RatingResponse};
use campus_service::RatingService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /events/{id}/ratings
pub async fn list_ratings(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath,
) -> ApiResult<Json<RatingListResponse>> {
    let service = RatingService::new(state.service_context());
    let response = service.list_ratings(&auth.principal, event_id).await?;
    Ok(Json(response))
}

/// POST /events/{id}/ratings
pub async fn add_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath,
    ValidatedJson(request): ValidatedJson<RatingRequest>,
) -> ApiResult<Created<Json<RatingResponse>>> {
    let service = RatingService::new(state.service_context());
    let response = service
        .add_rating(&auth.principal, event_id, request.rating)
        .await?;
    Ok(Created(Json(response)))
}

/// PUT /events/{id}/ratings
pub async fn update_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath,
    ValidatedJson(request): ValidatedJson<RatingRequest>,
) -> ApiResult<Json<RatingResponse>> {
    let service = RatingService::new(state.service_context());
    let response = service
        .update_rating(&auth.principal, event_id, request.rating)
        .await?;
    Ok(Json(response))
}

/// DELETE /events/{id}/ratings
pub async fn delete_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath,
) -> ApiResult<NoContent> {
    let service = RatingService::new(state.service_context());
    service.delete_rating(&auth.principal, event_id).await?;
    Ok(NoContent)
}
