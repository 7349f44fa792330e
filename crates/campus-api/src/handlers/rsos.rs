//! RSO handlers

use axum::{extract::State, Json};
use campus_service::dto::{
    CreateRsoRequest, CreatedRsoResponse, MembershipResponse, RsoResponse, UpdateRsoRequest,
};
use campus_service::RsoService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Found an RSO; the caller becomes its admin
///
/// POST /rsos
pub async fn create_rso(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateRsoRequest>,
) -> ApiResult<Created<Json<CreatedRsoResponse>>> {
    let service = RsoService::new(state.service_context());
    let response = service.create_rso(&auth.principal, request).await?;
    Ok(Created(Json(response)))
}

/// GET /rsos/{id}
pub async fn get_rso(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(rso_id): IdPath,
) -> ApiResult<Json<RsoResponse>> {
    let service = RsoService::new(state.service_context());
    let response = service.get_rso(rso_id).await?;
    Ok(Json(response))
}

/// PATCH /rsos/{id}
pub async fn update_rso(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(rso_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateRsoRequest>,
) -> ApiResult<Json<RsoResponse>> {
    let service = RsoService::new(state.service_context());
    let response = service.update_rso(&auth.principal, rso_id, request).await?;
    Ok(Json(response))
}

/// DELETE /rsos/{id}
pub async fn delete_rso(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(rso_id): IdPath,
) -> ApiResult<NoContent> {
    let service = RsoService::new(state.service_context());
    service.delete_rso(&auth.principal, rso_id).await?;
    Ok(NoContent)
}

/// POST /rsos/{id}/join
pub async fn join_rso(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(rso_id): IdPath,
) -> ApiResult<Created<Json<MembershipResponse>>> {
    let service = RsoService::new(state.service_context());
    let response = service.join_rso(&auth.principal, rso_id).await?;
    Ok(Created(Json(response)))
}
