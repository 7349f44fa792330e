//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{auth, comments, events, health, ratings, rsos, universities, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept outside the rate limiter
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(university_routes())
        .merge(event_routes())
        .merge(comment_routes())
        .merge(rso_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me/rsos", get(users::get_member_rsos))
        .route("/users/@me/rsos/administered", get(users::get_administered_rsos))
        .route("/users/@me/rsos/joinable", get(users::get_joinable_rsos))
        .route("/users/:user_id", delete(users::delete_user))
}

fn university_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/universities",
            post(universities::create_university).get(universities::list_universities),
        )
        .route(
            "/universities/:university_id",
            get(universities::get_university).delete(universities::delete_university),
        )
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(events::create_event).get(events::list_visible_events))
        .route("/events/pending", get(events::list_pending_events))
        .route(
            "/events/:event_id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/:event_id/status", put(events::set_event_status))
        .route(
            "/events/:event_id/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
        .route(
            "/events/:event_id/ratings",
            get(ratings::list_ratings)
                .post(ratings::add_rating)
                .put(ratings::update_rating)
                .delete(ratings::delete_rating),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comments/:comment_id",
        patch(comments::edit_comment).delete(comments::delete_comment),
    )
}

fn rso_routes() -> Router<AppState> {
    Router::new()
        .route("/rsos", post(rsos::create_rso))
        .route(
            "/rsos/:rso_id",
            get(rsos::get_rso).patch(rsos::update_rso).delete(rsos::delete_rso),
        )
        .route("/rsos/:rso_id/join", post(rsos::join_rso))
}
