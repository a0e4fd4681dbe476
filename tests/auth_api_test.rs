mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::*;
use serde_json::json;
use vacancy_portal::database::Store;

#[tokio::test]
async fn register_and_login_scenario() {
    let test = setup_app();

    let reply = register(&test.app, "Company A", "a@x.com", "p1").await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["company"]["email"], "a@x.com");
    assert_eq!(reply.body["company"]["is_admin"], false);
    assert!(reply.body["company"].get("password_hash").is_none());

    let ok = login(&test.app, "a@x.com", "p1").await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["redirect"], "/menu");
    assert!(session_cookie(&ok).starts_with("session="));

    let bad = login(&test.app, "a@x.com", "wrong").await;
    assert_eq!(bad.status, StatusCode::UNAUTHORIZED);
    assert_eq!(bad.body["kind"], "auth");

    let unknown = login(&test.app, "nobody@x.com", "p1").await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stored_password_is_hashed() {
    let test = setup_app();
    register(&test.app, "Company A", "a@x.com", "p1").await;

    let company = test
        .store
        .find_company_by_email("a@x.com")
        .await
        .unwrap()
        .expect("company stored");
    assert_ne!(company.password_hash, "p1");
    assert!(company.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let test = setup_app();
    assert_eq!(
        register(&test.app, "First", "dup@x.com", "p1").await.status,
        StatusCode::CREATED
    );
    let second = register(&test.app, "Second", "dup@x.com", "p2").await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    // The first account still logs in with its own password.
    assert_eq!(login(&test.app, "dup@x.com", "p1").await.status, StatusCode::OK);
    assert_eq!(
        login(&test.app, "dup@x.com", "p2").await.status,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn mismatched_passwords_are_rejected() {
    let test = setup_app();
    let reply = post_json(
        &test.app,
        "/registro",
        json!({
            "name": "Company A",
            "email": "a@x.com",
            "password": "p1",
            "confirm_password": "p2",
        }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["kind"], "validation");
    assert!(test.store.find_company_by_email("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let test = setup_app();

    for uri in ["/menu", "/administrar", "/registrar", "/admin"] {
        let reply = get(&test.app, uri, None).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(reply.body["kind"], "unauthenticated");
    }

    let forged = get(&test.app, "/menu", Some("session=not-a-token")).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let cookie = signed_up(&test.app, "Company A", "a@x.com", "p1").await;
    let menu = get(&test.app, "/menu", Some(&cookie)).await;
    assert_eq!(menu.status, StatusCode::OK);
    assert_eq!(menu.body["name"], "Company A");
    assert_eq!(menu.body["is_admin"], false);
}

#[tokio::test]
async fn bearer_token_is_accepted() {
    let test = setup_app();
    register(&test.app, "Company A", "a@x.com", "p1").await;
    let reply = login(&test.app, "a@x.com", "p1").await;
    let token = reply.body["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("GET")
        .uri("/menu")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&test.app, req).await.status, StatusCode::OK);
}

#[tokio::test]
async fn admin_panel_is_forbidden_to_regular_companies() {
    let test = setup_app();
    let cookie = signed_up(&test.app, "Company A", "a@x.com", "p1").await;

    let reply = get(&test.app, "/admin", Some(&cookie)).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["kind"], "forbidden");

    let admin = admin_cookie(&test).await;
    assert_eq!(get(&test.app, "/admin", Some(&admin)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn index_redirects_by_role() {
    let test = setup_app();

    let anonymous = get(&test.app, "/", None).await;
    assert_eq!(anonymous.status, StatusCode::OK);

    let cookie = signed_up(&test.app, "Company A", "a@x.com", "p1").await;
    let company = get(&test.app, "/", Some(&cookie)).await;
    assert_eq!(company.status, StatusCode::SEE_OTHER);
    assert_eq!(company.headers[header::LOCATION], "/menu");

    let admin = admin_cookie(&test).await;
    let reply = get(&test.app, "/", Some(&admin)).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.headers[header::LOCATION], "/admin");
}

#[tokio::test]
async fn logout_clears_the_cookie_and_is_idempotent() {
    let test = setup_app();
    let cookie = signed_up(&test.app, "Company A", "a@x.com", "p1").await;

    let first = get(&test.app, "/logout", Some(&cookie)).await;
    assert_eq!(first.status, StatusCode::OK);
    let set_cookie = first.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("session=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    let again = get(&test.app, "/logout", None).await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn admin_bootstrap_is_idempotent() {
    let test = setup_app();
    let auth = &test.state.auth_service;
    assert!(auth.ensure_admin("Root", "root@x.com", "pw").await.unwrap());
    assert!(!auth.ensure_admin("Root", "root@x.com", "other").await.unwrap());

    let root = test
        .store
        .find_company_by_email("root@x.com")
        .await
        .unwrap()
        .unwrap();
    assert!(root.is_admin);
}

#[tokio::test]
async fn health_reports_ok() {
    let test = setup_app();
    let reply = get(&test.app, "/health", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "ok");
}

async fn preflight(test: &TestApp, origin: &str) -> Reply {
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/login")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    send(&test.app, req).await
}

#[tokio::test]
async fn credentialed_cors_only_for_configured_origins() {
    let test = setup_app_with(|config| {
        config.cors_allowed_origins = vec!["https://portal.test".to_string()];
    });

    let allowed = preflight(&test, "https://portal.test").await;
    assert_eq!(
        allowed.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://portal.test"
    );
    assert_eq!(allowed.headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

    let foreign = preflight(&test, "https://attacker.test").await;
    assert!(foreign
        .headers
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn no_cors_headers_without_configured_origins() {
    let test = setup_app();
    let reply = preflight(&test, "https://attacker.test").await;
    assert!(reply.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    assert!(reply
        .headers
        .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
        .is_none());

    let req = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://attacker.test")
        .body(Body::empty())
        .unwrap();
    let reply = send(&test.app, req).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
