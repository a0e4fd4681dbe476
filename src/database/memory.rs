use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::store::Store;
use crate::error::{Error, Result};
use crate::models::company::{Company, NewCompany};
use crate::models::vacancy::{NewVacancy, Vacancy, VacancyWithCompany};
use crate::utils::time::now;

#[derive(Default)]
struct Collections {
    companies: Vec<Company>,
    // Insertion order; reads sort by creation time.
    vacancies: Vec<Vacancy>,
}

/// In-process store with the same semantics as `PgStore`.
#[derive(Default, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Collections>> {
        self.inner
            .lock()
            .map_err(|_| Error::Internal("memory store mutex poisoned".to_string()))
    }
}

/// Newest first; equal timestamps fall back to reverse insertion order, the
/// same tie-break `PgStore` gets from its `seq` column.
fn newest_first(mut items: Vec<Vacancy>) -> Vec<Vacancy> {
    items.reverse();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_company(&self, company: NewCompany) -> Result<Company> {
        let mut guard = self.lock()?;
        if guard.companies.iter().any(|c| c.email == company.email) {
            return Err(Error::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }
        let record = Company {
            id: Uuid::new_v4(),
            name: company.name,
            email: company.email,
            password_hash: company.password_hash,
            registered_at: now(),
            is_admin: company.is_admin,
        };
        guard.companies.push(record.clone());
        Ok(record)
    }

    async fn find_company_by_email(&self, email: &str) -> Result<Option<Company>> {
        let guard = self.lock()?;
        Ok(guard.companies.iter().find(|c| c.email == email).cloned())
    }

    async fn find_company_by_id(&self, id: Uuid) -> Result<Option<Company>> {
        let guard = self.lock()?;
        Ok(guard.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_vacancy(&self, vacancy: NewVacancy) -> Result<Vacancy> {
        let mut guard = self.lock()?;
        let record = Vacancy {
            id: Uuid::new_v4(),
            company_id: vacancy.company_id,
            title: vacancy.title,
            description: vacancy.description,
            requirements: vacancy.requirements,
            flyer_path: vacancy.flyer_path,
            active: true,
            created_at: now(),
        };
        guard.vacancies.push(record.clone());
        Ok(record)
    }

    async fn list_vacancies_by_company(&self, company_id: Uuid) -> Result<Vec<Vacancy>> {
        let guard = self.lock()?;
        let owned = guard
            .vacancies
            .iter()
            .filter(|v| v.company_id == company_id)
            .cloned()
            .collect();
        Ok(newest_first(owned))
    }

    async fn find_vacancy(&self, id: Uuid) -> Result<Option<Vacancy>> {
        let guard = self.lock()?;
        Ok(guard.vacancies.iter().find(|v| v.id == id).cloned())
    }

    async fn find_owned_vacancy(&self, id: Uuid, company_id: Uuid) -> Result<Option<Vacancy>> {
        let guard = self.lock()?;
        Ok(guard
            .vacancies
            .iter()
            .find(|v| v.id == id && v.company_id == company_id)
            .cloned())
    }

    async fn update_vacancy(&self, vacancy: &Vacancy) -> Result<bool> {
        let mut guard = self.lock()?;
        match guard.vacancies.iter_mut().find(|v| v.id == vacancy.id) {
            Some(existing) => {
                existing.title = vacancy.title.clone();
                existing.description = vacancy.description.clone();
                existing.requirements = vacancy.requirements.clone();
                existing.flyer_path = vacancy.flyer_path.clone();
                existing.active = vacancy.active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_vacancy_active(&self, id: Uuid, company_id: Uuid, active: bool) -> Result<bool> {
        let mut guard = self.lock()?;
        match guard
            .vacancies
            .iter_mut()
            .find(|v| v.id == id && v.company_id == company_id)
        {
            Some(existing) => {
                existing.active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_vacancies_with_company(&self) -> Result<Vec<VacancyWithCompany>> {
        let guard = self.lock()?;
        let joined = newest_first(guard.vacancies.clone())
            .into_iter()
            .filter_map(|vacancy| {
                let company = guard.companies.iter().find(|c| c.id == vacancy.company_id)?;
                Some(VacancyWithCompany {
                    company_name: company.name.clone(),
                    vacancy,
                })
            })
            .collect();
        Ok(joined)
    }

    async fn delete_vacancy(&self, id: Uuid) -> Result<bool> {
        let mut guard = self.lock()?;
        let before = guard.vacancies.len();
        guard.vacancies.retain(|v| v.id != id);
        Ok(guard.vacancies.len() < before)
    }
}
