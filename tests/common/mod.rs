#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tempfile::TempDir;
use tower::ServiceExt;
use vacancy_portal::{config::Config, database::MemoryStore, routes, AppState};

pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];
pub const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub uploads: TempDir,
}

pub fn setup_app() -> TestApp {
    setup_app_with(|_| {})
}

pub fn setup_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let uploads = tempfile::tempdir().expect("temp dir");
    let mut config = Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "memory".into(),
        session_secret: "test_secret_key".into(),
        session_ttl_hours: 1,
        uploads_dir: uploads.path().to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        cors_allowed_origins: Vec::new(),
        admin: None,
    };
    configure(&mut config);
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(config, store.clone());
    let app = routes::router(state.clone());
    TestApp {
        app,
        state,
        store,
        uploads,
    }
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: JsonValue,
}

pub async fn send(app: &Router, req: Request<Body>) -> Reply {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    Reply {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Reply {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: JsonValue) -> Reply {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> Reply {
    post_json(
        app,
        "/registro",
        json!({
            "name": name,
            "email": email,
            "password": password,
            "confirm_password": password,
        }),
    )
    .await
}

pub async fn login(app: &Router, email: &str, password: &str) -> Reply {
    post_json(app, "/login", json!({ "email": email, "password": password })).await
}

/// `name=value` pair to send back as a Cookie header.
pub fn session_cookie(reply: &Reply) -> String {
    reply
        .headers
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

pub async fn signed_up(app: &Router, name: &str, email: &str, password: &str) -> String {
    assert_eq!(register(app, name, email, password).await.status, StatusCode::CREATED);
    let reply = login(app, email, password).await;
    assert_eq!(reply.status, StatusCode::OK);
    session_cookie(&reply)
}

pub async fn admin_cookie(test: &TestApp) -> String {
    test.state
        .auth_service
        .ensure_admin("Root", "admin@portal.test", "admin-pass")
        .await
        .expect("admin bootstrap");
    let reply = login(&test.app, "admin@portal.test", "admin-pass").await;
    assert_eq!(reply.status, StatusCode::OK);
    session_cookie(&reply)
}

const BOUNDARY: &str = "----portal-test-boundary";

pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"flayer\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub async fn post_form(
    app: &Router,
    uri: &str,
    cookie: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Reply {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(fields, file)))
        .unwrap();
    send(app, req).await
}

pub async fn create_vacancy(
    app: &Router,
    cookie: &str,
    title: &str,
    file: Option<(&str, &[u8])>,
) -> String {
    let reply = post_form(
        app,
        "/registrar",
        cookie,
        &[
            ("titulo", title),
            ("descripcion", "Backend role"),
            ("requisitos", "Rust, SQL"),
        ],
        file,
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    reply.body["id"].as_str().expect("vacancy id").to_string()
}

pub async fn post_empty(app: &Router, uri: &str, cookie: &str) -> Reply {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}
