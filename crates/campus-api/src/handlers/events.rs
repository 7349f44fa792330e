//! Event handlers
//!
//! Creation, the caller's visible feed, the moderation queue, and per-event
//! reads and edits.

use axum::{extract::State, Json};
use campus_service::dto::{
    CreateEventRequest, EventResponse, SetEventStatusRequest, UpdateEventRequest,
};
use campus_service::EventService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create an event
///
/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.create_event(&auth.principal, request).await?;
    Ok(Created(Json(response)))
}

/// Approved events the caller may see, by date
///
/// GET /events
pub async fn list_visible_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.visible_events(&auth.principal).await?;
    Ok(Json(response))
}

/// Public events awaiting moderation
///
/// GET /events/pending
pub async fn list_pending_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.pending_public_events(&auth.principal).await?;
    Ok(Json(response))
}

/// GET /events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.get_event(&auth.principal, event_id).await?;
    Ok(Json(response))
}

/// PATCH /events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service
        .update_event(&auth.principal, event_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath,
) -> ApiResult<NoContent> {
    let service = EventService::new(state.service_context());
    service.delete_event(&auth.principal, event_id).await?;
    Ok(NoContent)
}

/// Approve or reject a pending event
///
/// PUT /events/{id}/status
pub async fn set_event_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath,
    ValidatedJson(request): ValidatedJson<SetEventStatusRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service
        .set_event_status(&auth.principal, event_id, request.status)
        .await?;
    Ok(Json(response))
}
