use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: Uuid,
    #[sqlx(rename = "empresa_id")]
    pub company_id: Uuid,
    #[sqlx(rename = "titulo")]
    pub title: String,
    #[sqlx(rename = "descripcion")]
    pub description: String,
    #[sqlx(rename = "requisitos")]
    pub requirements: String,
    #[sqlx(rename = "flayer_path")]
    pub flyer_path: Option<String>,
    #[sqlx(rename = "activa")]
    pub active: bool,
    #[sqlx(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVacancy {
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub flyer_path: Option<String>,
}

/// Vacancy joined with the company that owns it, as shown on the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VacancyWithCompany {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vacancy: Vacancy,
    #[sqlx(rename = "empresa_nombre")]
    pub company_name: String,
}
