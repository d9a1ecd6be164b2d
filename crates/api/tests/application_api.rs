//! HTTP-level integration tests for the `/api/applications` endpoints,
//! including the signup-to-decision flows.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_internship, delete_auth, get_auth, post_json, post_json_auth,
    put_json_auth, signup,
};
use internhub_db::repositories::TrackingRepo;
use serde_json::json;
use sqlx::PgPool;

/// Apply through the API and return the new application's id.
async fn apply(app: &axum::Router, token: &str, internship_id: i64) -> i64 {
    let response = post_json_auth(
        app.clone(),
        "/api/internships/apply",
        token,
        json!({ "internship_id": internship_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// End-to-end flows
// ---------------------------------------------------------------------------

/// signup -> login -> apply to listing 3 -> list shows one `submitted`
/// application with one `submitted` tracking entry.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_login_apply_flow(pool: PgPool) {
    internhub_db::seed::seed_sample_internships(&pool).await.unwrap();
    let app = common::build_test_app(pool);

    signup(&app, "alice@example.com", "pw123").await;
    let login = post_json(
        app.clone(),
        "/api/auth/login",
        json!({ "email": "alice@example.com", "password": "pw123" }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let token = body_json(login).await["token"].as_str().unwrap().to_string();

    let application_id = apply(&app, &token, 3).await;

    let list = body_json(get_auth(app.clone(), "/api/applications", &token).await).await;
    assert_eq!(list["total"], 1);
    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], application_id);
    assert_eq!(items[0]["status"], "submitted");
    assert_eq!(items[0]["internship"]["id"], 3);

    let detail = body_json(
        get_auth(app, &format!("/api/applications/{application_id}"), &token).await,
    )
    .await;
    let tracking = detail["tracking"].as_array().unwrap();
    assert_eq!(tracking.len(), 1);
    assert_eq!(tracking[0]["status"], "submitted");
}

/// submitted -> rejected: detail shows the new status and two history entries.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_update_flow(pool: PgPool) {
    let internship = create_internship(&pool, "SWE", "Acme", "Remote").await;
    let app = common::build_test_app(pool);
    let (_, token) = signup(&app, "bob@example.com", "pw").await;
    let id = apply(&app, &token, internship.id).await;
    let uri = format!("/api/applications/{id}");

    let response = put_json_auth(app.clone(), &uri, &token, json!({ "status": "rejected" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "rejected");

    let detail = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(detail["status"], "rejected");
    assert_eq!(detail["internship"]["title"], "SWE");

    let tracking = detail["tracking"].as_array().unwrap();
    assert_eq!(tracking.len(), 2);
    assert_eq!(tracking[0]["status"], "submitted");
    assert_eq!(tracking[1]["status"], "rejected");
    assert_eq!(tracking[1]["notes"], "Status changed to rejected");
}

// ---------------------------------------------------------------------------
// Update rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_without_status_change_adds_no_tracking(pool: PgPool) {
    let internship = create_internship(&pool, "SWE", "Acme", "Remote").await;
    let app = common::build_test_app(pool.clone());
    let (_, token) = signup(&app, "carol@example.com", "pw").await;
    let id = apply(&app, &token, internship.id).await;
    let uri = format!("/api/applications/{id}");

    let response = put_json_auth(
        app.clone(),
        &uri,
        &token,
        json!({ "status": "submitted", "notes": "Followed up", "resume_url": "https://cv" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["notes"], "Followed up");
    assert_eq!(json["resume_url"], "https://cv");

    assert_eq!(common::count_tracking(&pool, id).await, 1);

    // A custom note is stored on the tracking entry.
    put_json_auth(
        app,
        &uri,
        &token,
        json!({ "status": "under_review", "status_notes": "Recruiter replied" }),
    )
    .await;
    let history = TrackingRepo::list_for_application(&pool, id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].notes.as_deref(), Some("Recruiter replied"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_rejects_unknown_status(pool: PgPool) {
    let internship = create_internship(&pool, "SWE", "Acme", "Remote").await;
    let app = common::build_test_app(pool.clone());
    let (_, token) = signup(&app, "dan@example.com", "pw").await;
    let id = apply(&app, &token, internship.id).await;
    let uri = format!("/api/applications/{id}");

    for status in ["applied", "interview", "hired"] {
        let response = put_json_auth(app.clone(), &uri, &token, json!({ "status": status })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{status}");
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("under_review"));
    }

    assert_eq!(common::count_tracking(&pool, id).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_interview_date(pool: PgPool) {
    let internship = create_internship(&pool, "SWE", "Acme", "Remote").await;
    let app = common::build_test_app(pool);
    let (_, token) = signup(&app, "erin@example.com", "pw").await;
    let id = apply(&app, &token, internship.id).await;
    let uri = format!("/api/applications/{id}");

    let response = put_json_auth(
        app.clone(),
        &uri,
        &token,
        json!({ "status": "interview_scheduled", "interview_date": "2027-01-15T14:30:00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["interview_date"]
        .as_str()
        .unwrap()
        .starts_with("2027-01-15T14:30:00"));

    let response = put_json_auth(
        app,
        &uri,
        &token,
        json!({ "interview_date": "sometime next week" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing and ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status(pool: PgPool) {
    let a = create_internship(&pool, "A", "Acme", "Remote").await;
    let b = create_internship(&pool, "B", "Acme", "Remote").await;
    let app = common::build_test_app(pool);
    let (_, token) = signup(&app, "filter@example.com", "pw").await;
    apply(&app, &token, a.id).await;
    let second = apply(&app, &token, b.id).await;
    put_json_auth(
        app.clone(),
        &format!("/api/applications/{second}"),
        &token,
        json!({ "status": "accepted" }),
    )
    .await;

    let json = body_json(get_auth(app.clone(), "/api/applications", &token).await).await;
    assert_eq!(json["total"], 2);

    let json = body_json(get_auth(app.clone(), "/api/applications?status=accepted", &token).await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["id"], second);

    let response = get_auth(app, "/api/applications?status=interview", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Users only ever see their own applications.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_applications_are_private(pool: PgPool) {
    let internship = create_internship(&pool, "SWE", "Acme", "Remote").await;
    let app = common::build_test_app(pool);
    let (_, owner) = signup(&app, "owner@example.com", "pw").await;
    let (_, other) = signup(&app, "other@example.com", "pw").await;
    let id = apply(&app, &owner, internship.id).await;
    let uri = format!("/api/applications/{id}");

    let json = body_json(get_auth(app.clone(), "/api/applications", &other).await).await;
    assert_eq!(json["total"], 0);

    let response = get_auth(app.clone(), &uri, &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "Access denied");

    let response = put_json_auth(app.clone(), &uri, &other, json!({ "status": "accepted" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/applications/999999", &owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_application(pool: PgPool) {
    let internship = create_internship(&pool, "SWE", "Acme", "Remote").await;
    let app = common::build_test_app(pool.clone());
    let (_, token) = signup(&app, "del@example.com", "pw").await;
    let id = apply(&app, &token, internship.id).await;
    let uri = format!("/api/applications/{id}");

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Application deleted successfully"
    );
    assert_eq!(common::count_tracking(&pool, id).await, 0);

    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The listing can be applied to again afterwards.
    apply(&app, &token, internship.id).await;
}
