//! User handlers

use axum::{extract::State, Json};
use campus_service::dto::{CurrentUserResponse, RsoResponse};
use campus_service::{RsoService, UserService};

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(&auth.principal).await?;
    Ok(Json(response))
}

/// Delete an account. Super admin accounts can never be deleted.
///
/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete_user(&auth.principal, user_id).await?;
    Ok(NoContent)
}

/// RSOs the caller belongs to
///
/// GET /users/@me/rsos
pub async fn get_member_rsos(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<RsoResponse>>> {
    let service = RsoService::new(state.service_context());
    let response = service.list_member_rsos(&auth.principal).await?;
    Ok(Json(response))
}

/// GET /users/@me/rsos/administered
pub async fn get_administered_rsos(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<RsoResponse>>> {
    let service = RsoService::new(state.service_context());
    let response = service.list_admin_rsos(&auth.principal).await?;
    Ok(Json(response))
}

/// GET /users/@me/rsos/joinable
pub async fn get_joinable_rsos(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<RsoResponse>>> {
    let service = RsoService::new(state.service_context());
    let response = service.list_joinable_rsos(&auth.principal).await?;
    Ok(Json(response))
}
