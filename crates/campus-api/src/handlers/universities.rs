//! University handlers
//!
//! Creating and deleting universities is reserved for super admins; listing
//! is open to any signed-in user.

use axum::{extract::State, Json};
use campus_service::dto::{CreateUniversityRequest, UniversityResponse};
use campus_service::UniversityService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /universities
pub async fn create_university(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateUniversityRequest>,
) -> ApiResult<Created<Json<UniversityResponse>>> {
    let service = UniversityService::new(state.service_context());
    let response = service.create_university(&auth.principal, request).await?;
    Ok(Created(Json(response)))
}

/// GET /universities
pub async fn list_universities(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<UniversityResponse>>> {
    let service = UniversityService::new(state.service_context());
    let response = service.list_universities().await?;
    Ok(Json(response))
}

/// GET /universities/{id}
pub async fn get_university(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(university_id): IdPath,
) -> ApiResult<Json<UniversityResponse>> {
    let service = UniversityService::new(state.service_context());
    let response = service.get_university(university_id).await?;
    Ok(Json(response))
}

/// DELETE /universities/{id}
pub async fn delete_university(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(university_id): IdPath,
) -> ApiResult<NoContent> {
    let service = UniversityService::new(state.service_context());
    service
        .delete_university(&auth.principal, university_id)
        .await?;
    Ok(NoContent)
}
