use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::vacancy_dto::{ActionResponse, AdminVacancyListResponse},
    error::{Error, Result},
    middleware::auth::AdminSession,
    AppState,
};

#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Every vacancy with its company, newest first"),
        (status = 401, description = "No session"),
        (status = 403, description = "Not an administrator")
    )
)]
#[axum::debug_handler]
pub async fn admin_panel(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
) -> Result<impl IntoResponse> {
    let items = state.vacancy_service.admin_list().await?;
    Ok(Json(AdminVacancyListResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/admin/eliminar/{id}",
    params(
        ("id" = String, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy and flyer deleted"),
        (status = 400, description = "Malformed id"),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    if !state.vacancy_service.admin_delete(&id).await? {
        return Err(Error::NotFound("The vacancy could not be deleted".to_string()));
    }
    tracing::info!(admin_id = %admin.company_id, vacancy_id = %id, "admin removed vacancy");
    Ok(Json(ActionResponse::new("Vacancy deleted successfully", true)))
}
