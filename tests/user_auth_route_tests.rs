mod common;

use common::{cleanup, send, spawn_app};
use serde_json::json;

use orgmanage::db::models::Role;
use orgmanage::service::bootstrap::{ADMIN_EMAIL, ensure_default_admin};

#[tokio::test]
async fn create_then_login_issues_a_token_for_the_submitted_email() {
    let t = spawn_app("create-login").await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/api/users",
        None,
        Some(json!({"name": "A", "email": "a@x.com", "password": "secret1", "role": "user"})),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["email"], "a@x.com");

    let (status, body) = send(
        &t.app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({"email": "a@x.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], "a@x.com");

    let token = body["token"].as_str().expect("no token in response");
    let claims = t.state.tokens.verify(token).expect("issued token failed verification");
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.role, Role::User);

    cleanup(t);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_fail_distinguishably() {
    let t = spawn_app("login-failures").await;

    let (status, _) = send(
        &t.app,
        "POST",
        "/api/users",
        None,
        Some(json!({"name": "A", "email": "a@x.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, 201);

    // wrong password: 400, no token
    let (status, body) = send(
        &t.app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({"email": "a@x.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Invalid credentials");
    assert!(body.get("token").is_none());

    // unregistered email: 404, distinct message (preserved wire contract)
    let (status, body) = send(
        &t.app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({"email": "nobody@x.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "User not found");

    cleanup(t);
}

#[tokio::test]
async fn auth_login_route_is_an_alias() {
    let t = spawn_app("auth-alias").await;

    let (status, _) = send(
        &t.app,
        "POST",
        "/api/users",
        None,
        Some(json!({"name": "A", "email": "a@x.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, 201);

    let (status, body) = send(
        &t.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "a@x.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Login successful");

    cleanup(t);
}

#[tokio::test]
async fn duplicate_email_create_conflicts() {
    let t = spawn_app("duplicate-email").await;

    let payload = json!({"name": "A", "email": "a@x.com", "password": "secret1"});
    let (status, _) = send(&t.app, "POST", "/api/users", None, Some(payload.clone())).await;
    assert_eq!(status, 201);

    let (status, body) = send(&t.app, "POST", "/api/users", None, Some(payload)).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "User already exists");

    cleanup(t);
}

#[tokio::test]
async fn no_response_ever_contains_a_password_digest() {
    let t = spawn_app("digest-leak").await;

    let (_, created) = send(
        &t.app,
        "POST",
        "/api/users",
        None,
        Some(json!({"name": "A", "email": "a@x.com", "password": "secret1"})),
    )
    .await;
    let id = created["user"]["id"].as_i64().expect("no id");

    let (_, login) = send(
        &t.app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({"email": "a@x.com", "password": "secret1"})),
    )
    .await;
    let (_, listed) = send(&t.app, "GET", "/api/users", None, None).await;
    let (_, fetched) = send(&t.app, "GET", &format!("/api/users/{id}"), None, None).await;

    for body in [&created, &login, &listed, &fetched] {
        let rendered = body.to_string();
        assert!(!rendered.contains("password"), "digest leaked: {rendered}");
        assert!(!rendered.contains("$2"), "digest leaked: {rendered}");
    }

    cleanup(t);
}

#[tokio::test]
async fn update_rehashes_password_and_missing_ids_are_404() {
    let t = spawn_app("update-delete").await;

    let (_, created) = send(
        &t.app,
        "POST",
        "/api/users",
        None,
        Some(json!({"name": "A", "email": "a@x.com", "password": "secret1"})),
    )
    .await;
    let id = created["user"]["id"].as_i64().expect("no id");

    let (status, body) = send(
        &t.app,
        "PUT",
        &format!("/api/users/{id}"),
        None,
        Some(json!({"password": "secret2", "role": "admin"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["name"], "A");

    // old password no longer verifies, new one does
    let (status, _) = send(
        &t.app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({"email": "a@x.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, 400);
    let (status, _) = send(
        &t.app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({"email": "a@x.com", "password": "secret2"})),
    )
    .await;
    assert_eq!(status, 200);

    let (status, _) = send(&t.app, "PUT", "/api/users/999", None, Some(json!({"name": "B"}))).await;
    assert_eq!(status, 404);

    // delete is not idempotent: second call fails
    let (status, _) = send(&t.app, "DELETE", &format!("/api/users/{id}"), None, None).await;
    assert_eq!(status, 200);
    let (status, body) = send(&t.app, "DELETE", &format!("/api/users/{id}"), None, None).await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "User not found");

    cleanup(t);
}

#[tokio::test]
async fn missing_fields_on_create_are_rejected() {
    let t = spawn_app("create-validation").await;

    let (status, _) = send(
        &t.app,
        "POST",
        "/api/users",
        None,
        Some(json!({"email": "a@x.com"})),
    )
    .await;
    assert_eq!(status, 400);

    cleanup(t);
}

#[tokio::test]
async fn bootstrap_is_idempotent_and_yields_a_working_admin_login() {
    let t = spawn_app("bootstrap").await;

    ensure_default_admin(&t.state.users).await;
    ensure_default_admin(&t.state.users).await;

    let admins: Vec<_> = t
        .state
        .users
        .list()
        .await
        .expect("list failed")
        .into_iter()
        .filter(|u| u.email == ADMIN_EMAIL)
        .collect();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].role, Role::Admin);

    let (status, body) = send(
        &t.app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({"email": ADMIN_EMAIL, "password": "admin123"})),
    )
    .await;
    assert_eq!(status, 200);
    let token = body["token"].as_str().expect("no token");
    let claims = t.state.tokens.verify(token).expect("verify failed");
    assert_eq!(claims.role, Role::Admin);

    cleanup(t);
}
