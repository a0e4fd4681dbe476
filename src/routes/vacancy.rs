use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::{
    dto::vacancy_dto::{ActionResponse, VacancyDetailResponse, VacancyListResponse, VacancyPayload},
    error::{Error, Result},
    middleware::auth::Session,
    services::{upload_service::IncomingFile, vacancy_service::UpdateOutcome},
    AppState,
};

/// Checkbox semantics: a present field is "on" unless it spells out a false value.
fn checkbox_value(raw: &str) -> bool {
    !matches!(raw.trim().to_ascii_lowercase().as_str(), "false" | "off" | "0")
}

/// Reads the vacancy form: `titulo`, `descripcion`, `requisitos`, `activa`
/// and an optional `flayer` image.
async fn read_vacancy_form(
    mut multipart: Multipart,
) -> Result<(VacancyPayload, Option<IncomingFile>)> {
    let mut payload = VacancyPayload::default();
    let mut flyer = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "titulo" => payload.title = field.text().await?.trim().to_string(),
            "descripcion" => payload.description = field.text().await?.trim().to_string(),
            "requisitos" => payload.requirements = field.text().await?.trim().to_string(),
            "activa" => payload.active = checkbox_value(&field.text().await?),
            "flayer" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                flyer = Some(IncomingFile { file_name, data });
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown form field");
            }
        }
    }

    Ok((payload, flyer))
}

pub async fn new_vacancy_form(Session(_identity): Session) -> impl IntoResponse {
    Json(json!({
        "fields": ["titulo", "descripcion", "requisitos", "flayer"],
        "accepted_images": crate::services::upload_service::ALLOWED_EXTENSIONS,
    }))
}

#[utoipa::path(
    post,
    path = "/registrar",
    responses(
        (status = 201, description = "Vacancy created"),
        (status = 400, description = "Invalid form"),
        (status = 415, description = "Flyer is not a png/jpg/jpeg/gif image")
    )
)]
#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    Session(identity): Session,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let (payload, flyer) = read_vacancy_form(multipart).await?;
    let id = state
        .vacancy_service
        .create(identity.company_id, payload, flyer)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::new("Vacancy registered successfully", true).with_id(id)),
    ))
}

#[utoipa::path(
    get,
    path = "/administrar",
    responses(
        (status = 200, description = "Vacancies of the signed-in company, newest first"),
        (status = 401, description = "No session")
    )
)]
#[axum::debug_handler]
pub async fn list_own_vacancies(
    State(state): State<AppState>,
    Session(identity): Session,
) -> Result<impl IntoResponse> {
    let items = state.vacancy_service.list_own(identity.company_id).await?;
    Ok(Json(VacancyListResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/editar/{id}",
    params(
        ("id" = String, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy found"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Vacancy not found or not owned")
    )
)]
#[axum::debug_handler]
pub async fn get_vacancy(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.get(identity.company_id, &id).await?;
    Ok(Json(VacancyDetailResponse::from(vacancy)))
}

#[utoipa::path(
    post,
    path = "/editar/{id}",
    params(
        ("id" = String, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy updated, or nothing changed"),
        (status = 400, description = "Malformed id or invalid form"),
        (status = 404, description = "Vacancy not found or not owned"),
        (status = 415, description = "Flyer is not a png/jpg/jpeg/gif image")
    )
)]
#[axum::debug_handler]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let (payload, flyer) = read_vacancy_form(multipart).await?;
    let outcome = state
        .vacancy_service
        .update(identity.company_id, &id, payload, flyer)
        .await?;

    let response = match outcome {
        UpdateOutcome::Updated => ActionResponse::new("Vacancy updated successfully", true),
        UpdateOutcome::Unchanged => ActionResponse::new("No changes were made to the vacancy", false),
    };
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/cerrar/{id}",
    params(
        ("id" = String, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy closed"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Vacancy not found or not owned")
    )
)]
#[axum::debug_handler]
pub async fn close_vacancy(
    State(state): State<AppState>,
    Session(identity): Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    if !state.vacancy_service.close(identity.company_id, &id).await? {
        return Err(Error::NotFound("Vacancy to close was not found".to_string()));
    }
    Ok(Json(ActionResponse::new("Vacancy marked as closed", true)))
}
