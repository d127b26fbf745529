//! HTTP-level integration tests for the `/api/projects` endpoints.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get, post_json, post_text, send};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/projects", json!({"name": "  Checkout redesign "})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Checkout redesign");
    assert!(json["id"].is_number());
    assert!(json["createdAt"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_from_plain_text(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_text(app, "/api/projects", "Marketing site\n").await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["name"], "Marketing site");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_form_body_is_not_a_name(pool: PgPool) {
    let request = Request::post("/api/projects")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("name=Foo"))
        .unwrap();
    let response = send(common::build_test_app(pool.clone()), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Name is required");

    let listed = body_json(get(common::build_test_app(pool), "/api/projects").await).await;
    assert_eq!(listed, json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_blank_name_returns_400(pool: PgPool) {
    for body in [json!({}), json!({"name": ""}), json!({"name": "   "})] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/projects", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Name is required");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_name_returns_400(pool: PgPool) {
    common::create_project(&pool, "Onboarding").await;

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/projects", json!({"name": "Onboarding"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Project name exists");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_concurrent_duplicate_names_create_one_project(pool: PgPool) {
    let requests = (0..4).map(|_| {
        post_json(
            common::build_test_app(pool.clone()),
            "/api/projects",
            json!({"name": "Race"}),
        )
    });
    let responses = spawn_all(requests).await;

    let created = responses
        .iter()
        .filter(|s| **s == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1);
    assert!(responses
        .iter()
        .all(|s| *s == StatusCode::CREATED || *s == StatusCode::BAD_REQUEST));
}

/// Run the requests on separate tasks and collect their statuses.
async fn spawn_all<F>(requests: impl Iterator<Item = F>) -> Vec<StatusCode>
where
    F: std::future::Future<Output = axum::http::Response<axum::body::Body>> + Send + 'static,
{
    let handles: Vec<_> = requests.map(tokio::spawn).collect();
    let mut statuses = Vec::with_capacity(handles.len());
    for handle in handles {
        statuses.push(handle.await.unwrap().status());
    }
    statuses
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_projects_newest_first(pool: PgPool) {
    for name in ["Alpha", "Beta", "Gamma"] {
        common::create_project(&pool, name).await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Gamma", "Beta", "Alpha"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_project_by_id(pool: PgPool) {
    let id = common::create_project(&pool, "Get Me").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Get Me");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Project not found");
}
