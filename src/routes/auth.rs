use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde_json::json;

use crate::{
    dto::auth_dto::{CompanyResponse, LoginPayload, LoginResponse, MenuResponse, RegisterPayload},
    error::Result,
    middleware::auth::{clear_cookie, Session, SessionIdentity},
    AppState,
};

fn landing_for(identity: &SessionIdentity) -> &'static str {
    if identity.is_admin {
        "/admin"
    } else {
        "/menu"
    }
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page for anonymous visitors"),
        (status = 303, description = "Signed-in companies are sent to their panel")
    )
)]
pub async fn index(session: Option<Session>) -> Response {
    match session {
        Some(Session(identity)) => Redirect::to(landing_for(&identity)).into_response(),
        None => Json(json!({
            "message": "Vacancy portal",
            "login": "/login",
            "register": "/registro",
        }))
        .into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/login",
    responses(
        (status = 200, description = "Session established"),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    let identity = state.auth_service.login(payload).await?;
    let token = state.sessions.issue(&identity)?;
    let cookie = state.sessions.cookie(&token);

    let body = LoginResponse {
        message: format!("Welcome, {}", identity.name),
        token,
        redirect: landing_for(&identity).to_string(),
        company_id: identity.company_id,
        name: identity.name,
        is_admin: identity.is_admin,
    };
    Ok(([(header::SET_COOKIE, cookie)], Json(body)))
}

#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 200, description = "Session cleared"))
)]
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_cookie())],
        Json(json!({ "message": "Signed out", "redirect": "/" })),
    )
}

#[utoipa::path(
    get,
    path = "/menu",
    responses(
        (status = 200, description = "Signed-in company"),
        (status = 401, description = "No session")
    )
)]
pub async fn menu(Session(identity): Session) -> Json<MenuResponse> {
    Json(MenuResponse {
        company_id: identity.company_id,
        name: identity.name,
        is_admin: identity.is_admin,
    })
}

pub async fn register_form() -> impl IntoResponse {
    Json(json!({
        "fields": ["name", "email", "password", "confirm_password"],
    }))
}

#[utoipa::path(
    post,
    path = "/registro",
    responses(
        (status = 201, description = "Company registered"),
        (status = 400, description = "Invalid payload or passwords differ"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    let company = state.auth_service.register(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Registration successful. Please sign in.",
            "redirect": "/",
            "company": CompanyResponse::from(company),
        })),
    ))
}
