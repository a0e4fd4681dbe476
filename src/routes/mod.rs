pub mod admin;
pub mod auth;
pub mod health;
pub mod vacancy;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{middleware::cors::cors_layer, AppState};

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    let static_root = state.uploads.root().to_path_buf();
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/health", get(health::health))
        .route("/", get(auth::index))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/menu", get(auth::menu))
        .route("/registro", get(auth::register_form).post(auth::register))
        .route(
            "/registrar",
            get(vacancy::new_vacancy_form).post(vacancy::create_vacancy),
        )
        .route("/administrar", get(vacancy::list_own_vacancies))
        .route(
            "/editar/:id",
            get(vacancy::get_vacancy).post(vacancy::update_vacancy),
        )
        .route("/cerrar/:id", get(vacancy::close_vacancy))
        .route("/admin", get(admin::admin_panel))
        .route("/admin/eliminar/:id", post(admin::delete_vacancy))
        .nest_service("/static", ServeDir::new(static_root))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit))
}
