use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vacancy::{Vacancy, VacancyWithCompany};
use crate::utils::time::to_display;

/// Text fields of the vacancy form, shared by create and edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VacancyPayload {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "requirements are required"))]
    pub requirements: String,
    /// Checkbox semantics: only meaningful on edit.
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub flyer_path: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyDetailResponse {
    #[serde(flatten)]
    pub vacancy: VacancyResponse,
    pub created_at_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyListResponse {
    pub items: Vec<VacancyResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminVacancyResponse {
    #[serde(flatten)]
    pub vacancy: VacancyResponse,
    pub company_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminVacancyListResponse {
    pub items: Vec<AdminVacancyResponse>,
}

/// Feedback for the presentation layer after a state-changing action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub changed: bool,
}

impl ActionResponse {
    pub fn new(message: impl Into<String>, changed: bool) -> Self {
        Self {
            message: message.into(),
            id: None,
            changed,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<Vacancy> for VacancyResponse {
    fn from(value: Vacancy) -> Self {
        Self {
            id: value.id,
            company_id: value.company_id,
            title: value.title,
            description: value.description,
            requirements: value.requirements,
            flyer_path: value.flyer_path,
            active: value.active,
            created_at: value.created_at,
        }
    }
}

impl From<Vacancy> for VacancyDetailResponse {
    fn from(value: Vacancy) -> Self {
        let created_at_display = to_display(value.created_at);
        Self {
            vacancy: value.into(),
            created_at_display,
        }
    }
}

impl From<VacancyWithCompany> for AdminVacancyResponse {
    fn from(value: VacancyWithCompany) -> Self {
        Self {
            vacancy: value.vacancy.into(),
            company_name: value.company_name,
        }
    }
}
