use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::Store;
use crate::dto::vacancy_dto::VacancyPayload;
use crate::error::{Error, Result};
use crate::models::vacancy::{NewVacancy, Vacancy, VacancyWithCompany};
use crate::services::upload_service::{IncomingFile, UploadService};

#[derive(Clone)]
pub struct VacancyService {
    store: Arc<dyn Store>,
    uploads: UploadService,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Unchanged,
}

/// Ids arrive as raw path segments; a malformed one is a validation failure,
/// never a lookup miss.
pub fn parse_vacancy_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| Error::Validation("Invalid vacancy id".to_string()))
}

fn not_found() -> Error {
    Error::NotFound("Vacancy not found or not owned by this company".to_string())
}

impl VacancyService {
    pub fn new(store: Arc<dyn Store>, uploads: UploadService) -> Self {
        Self { store, uploads }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        payload: VacancyPayload,
        file: Option<IncomingFile>,
    ) -> Result<Uuid> {
        payload.validate()?;
        if self.store.find_company_by_id(company_id).await?.is_none() {
            return Err(Error::NotFound("Company not found".to_string()));
        }

        let flyer_path = self.uploads.accept(company_id, file).await?;
        let vacancy = self
            .store
            .insert_vacancy(NewVacancy {
                company_id,
                title: payload.title,
                description: payload.description,
                requirements: payload.requirements,
                flyer_path: flyer_path.clone(),
            })
            .await;

        match vacancy {
            Ok(vacancy) => {
                tracing::info!(vacancy_id = %vacancy.id, company_id = %company_id, "vacancy created");
                Ok(vacancy.id)
            }
            Err(e) => {
                if let Some(path) = flyer_path {
                    self.uploads.remove(&path).await;
                }
                Err(e)
            }
        }
    }

    pub async fn list_own(&self, company_id: Uuid) -> Result<Vec<Vacancy>> {
        self.store.list_vacancies_by_company(company_id).await
    }

    pub async fn get(&self, company_id: Uuid, vacancy_id: &str) -> Result<Vacancy> {
        let id = parse_vacancy_id(vacancy_id)?;
        self.store
            .find_owned_vacancy(id, company_id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        vacancy_id: &str,
        payload: VacancyPayload,
        file: Option<IncomingFile>,
    ) -> Result<UpdateOutcome> {
        let existing = self.get(company_id, vacancy_id).await?;
        payload.validate()?;

        // The previous flyer is only removed once the record points at its
        // replacement; a failed write removes the replacement instead.
        let replacement = match self.uploads.validate(file)? {
            Some(upload) => Some(self.uploads.store(company_id, upload).await?),
            None => None,
        };

        let updated = Vacancy {
            title: payload.title,
            description: payload.description,
            requirements: payload.requirements,
            flyer_path: replacement.clone().or_else(|| existing.flyer_path.clone()),
            active: payload.active,
            ..existing.clone()
        };

        if updated.title == existing.title
            && updated.description == existing.description
            && updated.requirements == existing.requirements
            && updated.flyer_path == existing.flyer_path
            && updated.active == existing.active
        {
            return Ok(UpdateOutcome::Unchanged);
        }

        let written = match self.store.update_vacancy(&updated).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(not_found()),
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Some(path) = replacement.as_deref() {
                self.uploads.remove(path).await;
            }
            return Err(e);
        }

        if let (Some(_), Some(previous)) = (&replacement, existing.flyer_path.as_deref()) {
            self.uploads.remove(previous).await;
        }
        tracing::info!(vacancy_id = %updated.id, active = updated.active, "vacancy updated");
        Ok(UpdateOutcome::Updated)
    }

    /// Returns whether a vacancy with that id owned by `company_id` was found.
    pub async fn close(&self, company_id: Uuid, vacancy_id: &str) -> Result<bool> {
        let id = parse_vacancy_id(vacancy_id)?;
        let found = self.store.set_vacancy_active(id, company_id, false).await?;
        if found {
            tracing::info!(vacancy_id = %id, "vacancy closed");
        }
        Ok(found)
    }

    pub async fn admin_list(&self) -> Result<Vec<VacancyWithCompany>> {
        self.store.list_vacancies_with_company().await
    }

    pub async fn admin_delete(&self, vacancy_id: &str) -> Result<bool> {
        let id = parse_vacancy_id(vacancy_id)?;
        let vacancy = self
            .store
            .find_vacancy(id)
            .await?
            .ok_or_else(|| Error::NotFound("Vacancy not found".to_string()))?;

        if let Some(path) = vacancy.flyer_path.as_deref() {
            if let Err(e) = self.uploads.try_remove(path).await {
                tracing::warn!(vacancy_id = %id, path, error = %e, "failed to delete flyer");
            }
        }

        let deleted = self.store.delete_vacancy(id).await?;
        if deleted {
            tracing::info!(vacancy_id = %id, "vacancy deleted by administrator");
        }
        Ok(deleted)
    }
}
