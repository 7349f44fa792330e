//! API Integration Tests
//!
//! These tests require:
//! - A running PostgreSQL instance (migrations are applied on start)
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

async fn server() -> Option<TestServer> {
    if !check_test_env() {
        return None;
    }
    Some(TestServer::start().await.expect("Failed to start server"))
}

/// A university plus `count` students registered under one email domain
async fn campus(server: &TestServer, count: usize) -> (String, Vec<AuthResponse>) {
    let root = server.super_admin().await.unwrap();
    let university = server.create_university(&root).await.unwrap();
    let domain = unique_domain();

    let mut students = Vec::with_capacity(count);
    for n in 0..count {
        let email = format!("student{n}@{domain}");
        students.push(server.register(&email, Some(&university.id)).await.unwrap());
    }
    (university.id, students)
}

fn emails(students: &[AuthResponse]) -> Vec<String> {
    students.iter().map(|s| s.user.email.clone()).collect()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let Some(server) = server().await else { return };

    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_login_and_me() {
    let Some(server) = server().await else { return };

    let email = format!("Solo@{}", unique_domain());
    let request = RegisterRequest::new(&email, None);
    let response = server.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.user.role, "student");
    assert_eq!(auth.user.email, email.to_lowercase());
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);

    let response = server
        .post("/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.user.id, auth.user.id);

    let response = server.get_auth("/users/@me", &login.access_token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.username, request.username);
    assert_eq!(me.university_id, None);

    let response = server.post("/auth/register", &request).await.unwrap();
    let err = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(err.code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_authentication_failures() {
    let Some(server) = server().await else { return };

    let response = server
        .post(
            "/auth/login",
            &LoginRequest {
                email: format!("nobody@{}", unique_domain()),
                password: "wrongpass1".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get("/events").await.unwrap();
    let err = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(err.code, "MISSING_AUTHORIZATION");

    let response = server.get_auth("/events", "not-a-jwt").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Universities and accounts
// ============================================================================

#[tokio::test]
async fn test_universities_are_super_admin_only() {
    let Some(server) = server().await else { return };
    let (university_id, students) = campus(&server, 1).await;
    let token = &students[0].access_token;

    let response = server
        .post_auth("/universities", token, &CreateUniversityRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth(&format!("/universities/{university_id}"), token)
        .await
        .unwrap();
    let university: UniversityResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(university.id, university_id);

    let root = server
        .post("/auth/login", &json!({ "email": server.bootstrap_email, "password": PASSWORD }))
        .await
        .unwrap();
    let root: AuthResponse = assert_json(root, StatusCode::OK).await.unwrap();
    assert_eq!(root.user.role, "super_admin");

    // Students still reference it.
    let response = server
        .delete_auth(&format!("/universities/{university_id}"), &root.access_token)
        .await
        .unwrap();
    let err = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(err.code, "STILL_REFERENCED");

    let response = server
        .get_auth("/universities/not-a-number", token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_super_admin_accounts_cannot_be_deleted() {
    let Some(server) = server().await else { return };
    let root = server.super_admin().await.unwrap();

    let response = server.get_auth("/users/@me", &root).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.role, "super_admin");

    let response = server
        .delete_auth(&format!("/users/{}", me.id), &root)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let student = server
        .register(&format!("leaver@{}", unique_domain()), None)
        .await
        .unwrap();
    let response = server
        .delete_auth(&format!("/users/{}", student.user.id), &student.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// RSO Tests
// ============================================================================

#[tokio::test]
async fn test_chess_club_end_to_end() {
    let Some(server) = server().await else { return };
    let (university_id, students) = campus(&server, 6).await;
    let alice = &students[0];
    let outsider = &students[5];

    let request = CreateRsoRequest {
        name: format!("Chess Club {}", unique_suffix()),
        member_emails: emails(&students[1..5]),
    };
    let response = server
        .post_auth("/rsos", &alice.access_token, &request)
        .await
        .unwrap();
    let created: CreatedRsoResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.rso.status, "active");
    assert_eq!(created.rso.member_count, 5);
    assert_eq!(created.rso.university_id, university_id);
    assert_eq!(created.rso.admin_id, alice.user.id);
    assert_eq!(created.founder_role, "admin");

    // Same token, role re-read from storage.
    let response = server.get_auth("/users/@me", &alice.access_token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.role, "admin");

    let response = server
        .get_auth("/users/@me/rsos/administered", &alice.access_token)
        .await
        .unwrap();
    let administered: Vec<RsoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(administered.len(), 1);

    let mut event = CreateEventRequest::new("rso");
    event.rso_id = Some(created.rso.id.clone());
    let response = server
        .post_auth("/events", &alice.access_token, &event)
        .await
        .unwrap();
    let event: EventResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(event.status, "approved");
    assert_eq!(event.university_id.as_deref(), Some(university_id.as_str()));

    let response = server.get_auth("/events", &students[1].access_token).await.unwrap();
    let seen: Vec<EventResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(seen.iter().any(|e| e.id == event.id));

    let response = server.get_auth("/events", &outsider.access_token).await.unwrap();
    let seen: Vec<EventResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(seen.iter().all(|e| e.id != event.id));

    let response = server
        .get_auth(&format!("/events/{}", event.id), &outsider.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Joining makes the event visible.
    let response = server
        .post_auth(
            &format!("/rsos/{}/join", created.rso.id),
            &outsider.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    let response = server
        .post_auth(
            &format!("/rsos/{}/join", created.rso.id),
            &outsider.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    let err = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(err.code, "ALREADY_MEMBER");

    let response = server.get_auth("/events", &outsider.access_token).await.unwrap();
    let seen: Vec<EventResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(seen.iter().any(|e| e.id == event.id));
}

#[tokio::test]
async fn test_rso_founding_rejections_write_nothing() {
    let Some(server) = server().await else { return };
    let (_, students) = campus(&server, 5).await;
    let alice = &students[0];

    let too_few = CreateRsoRequest {
        name: "Tiny Club".to_string(),
        member_emails: emails(&students[1..4]),
    };
    let response = server
        .post_auth("/rsos", &alice.access_token, &too_few)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let mut with_ghost = emails(&students[1..4]);
    let ghost = format!("ghost@{}", unique_domain());
    with_ghost.push(ghost.clone());
    let response = server
        .post_auth(
            "/rsos",
            &alice.access_token,
            &CreateRsoRequest {
                name: "Ghost Club".to_string(),
                member_emails: with_ghost,
            },
        )
        .await
        .unwrap();
    let err = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.code, "MEMBERS_NOT_FOUND");
    assert_eq!(err.details.unwrap()["missing_emails"], json!([ghost]));

    let foreign = server
        .register(&format!("visitor@{}", unique_domain()), None)
        .await
        .unwrap();
    let mut mixed = emails(&students[1..4]);
    mixed.push(foreign.user.email.clone());
    let response = server
        .post_auth(
            "/rsos",
            &alice.access_token,
            &CreateRsoRequest {
                name: "Mixed Club".to_string(),
                member_emails: mixed,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get_auth("/users/@me", &alice.access_token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.role, "student");

    let response = server
        .get_auth("/users/@me/rsos", &students[1].access_token)
        .await
        .unwrap();
    let memberships: Vec<RsoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(memberships.is_empty());
}

// ============================================================================
// Event moderation
// ============================================================================

#[tokio::test]
async fn test_public_event_moderation() {
    let Some(server) = server().await else { return };
    let root = server.super_admin().await.unwrap();
    let (_, students) = campus(&server, 2).await;
    let author = &students[0];
    let peer = &students[1];

    let response = server
        .post_auth("/events", &author.access_token, &CreateEventRequest::new("public"))
        .await
        .unwrap();
    let event: EventResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(event.status, "pending");

    let response = server.get_auth("/events", &peer.access_token).await.unwrap();
    let seen: Vec<EventResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(seen.iter().all(|e| e.id != event.id));

    let response = server.get_auth("/events/pending", &peer.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get_auth("/events/pending", &root).await.unwrap();
    let pending: Vec<EventResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(pending.iter().any(|e| e.id == event.id));

    let status_path = format!("/events/{}/status", event.id);
    let response = server
        .put_auth(&status_path, &peer.access_token, &json!({ "status": "approved" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(&status_path, &root, &json!({ "status": "approved" }))
        .await
        .unwrap();
    let approved: EventResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(approved.status, "approved");

    let response = server
        .put_auth(&status_path, &root, &json!({ "status": "rejected" }))
        .await
        .unwrap();
    let err = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(err.code, "EVENT_NOT_PENDING");

    let response = server.get_auth("/events", &peer.access_token).await.unwrap();
    let seen: Vec<EventResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(seen.iter().any(|e| e.id == event.id));
}

// ============================================================================
// Comments and ratings
// ============================================================================

#[tokio::test]
async fn test_comments_and_ratings() {
    let Some(server) = server().await else { return };
    let (university_id, students) = campus(&server, 2).await;
    let author = &students[0];
    let other = &students[1];

    let mut private = CreateEventRequest::new("private");
    private.university_id = Some(university_id);
    let response = server
        .post_auth("/events", &author.access_token, &private)
        .await
        .unwrap();
    let event: EventResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(event.status, "approved");

    let comments_path = format!("/events/{}/comments", event.id);
    let response = server
        .post_auth(&comments_path, &author.access_token, &json!({ "content": "Who's in?" }))
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/comments/{}", comment.id),
            &other.access_token,
            &json!({ "content": "hijacked" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get_auth(&comments_path, &other.access_token).await.unwrap();
    let listed: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "Who's in?");

    let ratings_path = format!("/events/{}/ratings", event.id);
    let response = server
        .put_auth(&ratings_path, &other.access_token, &json!({ "rating": 3 }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    for (token, score) in [(&author.access_token, 5), (&other.access_token, 2)] {
        let response = server
            .post_auth(&ratings_path, token, &json!({ "rating": score }))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }
    let response = server
        .post_auth(&ratings_path, &other.access_token, &json!({ "rating": 4 }))
        .await
        .unwrap();
    let err = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(err.code, "ALREADY_RATED");

    let response = server
        .post_auth(&ratings_path, &other.access_token, &json!({ "rating": 9 }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get_auth(&ratings_path, &author.access_token).await.unwrap();
    let ratings: RatingListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ratings.ratings.len(), 2);
    assert_eq!(ratings.average_rating, Some(3.5));

    let response = server
        .delete_auth(&ratings_path, &other.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}
