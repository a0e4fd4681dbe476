//! Persistence gateway over the `companies` and `vacancies` collections.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::company::{Company, NewCompany};
use crate::models::vacancy::{NewVacancy, Vacancy, VacancyWithCompany};

/// Every company/vacancy read and write goes through this trait. Services hold
/// it as `Arc<dyn Store>` so the backing engine is chosen once, at startup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a company. Fails with `Error::Conflict` if the email is taken.
    async fn insert_company(&self, company: NewCompany) -> Result<Company>;

    async fn find_company_by_email(&self, email: &str) -> Result<Option<Company>>;

    async fn find_company_by_id(&self, id: Uuid) -> Result<Option<Company>>;

    async fn insert_vacancy(&self, vacancy: NewVacancy) -> Result<Vacancy>;

    /// Vacancies owned by `company_id`, newest first.
    async fn list_vacancies_by_company(&self, company_id: Uuid) -> Result<Vec<Vacancy>>;

    async fn find_vacancy(&self, id: Uuid) -> Result<Option<Vacancy>>;

    /// Looks a vacancy up by id and owner at once, so a foreign vacancy and a
    /// missing one are indistinguishable.
    async fn find_owned_vacancy(&self, id: Uuid, company_id: Uuid) -> Result<Option<Vacancy>>;

    /// Overwrite the editable fields of an existing vacancy. Returns whether a
    /// record with that id exists.
    async fn update_vacancy(&self, vacancy: &Vacancy) -> Result<bool>;

    /// Returns whether a vacancy with that id and owner was found.
    async fn set_vacancy_active(&self, id: Uuid, company_id: Uuid, active: bool) -> Result<bool>;

    /// Every vacancy joined with its owning company, newest first. Vacancies
    /// whose company no longer exists are left out.
    async fn list_vacancies_with_company(&self) -> Result<Vec<VacancyWithCompany>>;

    async fn delete_vacancy(&self, id: Uuid) -> Result<bool>;
}
