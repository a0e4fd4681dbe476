use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::store::Store;
use crate::error::{Error, Result};
use crate::models::company::{Company, NewCompany};
use crate::models::vacancy::{NewVacancy, Vacancy, VacancyWithCompany};

const COMPANY_COLUMNS: &str = "id, nombre, email, password_hash, fecha_registro, es_admin";
const VACANCY_COLUMNS: &str =
    "id, empresa_id, titulo, descripcion, requisitos, flayer_path, activa, fecha_creacion";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_company(&self, company: NewCompany) -> Result<Company> {
        let query = format!(
            r#"
            INSERT INTO companies (id, nombre, email, password_hash, fecha_registro, es_admin)
            VALUES ($1, $2, $3, $4, NOW(), $5)
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        );
        let row = sqlx::query_as::<_, Company>(&query)
            .bind(Uuid::new_v4())
            .bind(&company.name)
            .bind(&company.email)
            .bind(&company.password_hash)
            .bind(company.is_admin)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match Error::from(e) {
                Error::Conflict(_) => {
                    Error::Conflict("An account with this email already exists".to_string())
                }
                other => other,
            })?;

        Ok(row)
    }

    async fn find_company_by_email(&self, email: &str) -> Result<Option<Company>> {
        let query = format!("SELECT {} FROM companies WHERE email = $1", COMPANY_COLUMNS);
        let row = sqlx::query_as::<_, Company>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_company_by_id(&self, id: Uuid) -> Result<Option<Company>> {
        let query = format!("SELECT {} FROM companies WHERE id = $1", COMPANY_COLUMNS);
        let row = sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_vacancy(&self, vacancy: NewVacancy) -> Result<Vacancy> {
        let query = format!(
            r#"
            INSERT INTO vacancies (
                id, empresa_id, titulo, descripcion, requisitos, flayer_path, activa, fecha_creacion
            ) VALUES ($1, $2, $3, $4, $5, $6, TRUE, NOW())
            RETURNING {}
            "#,
            VACANCY_COLUMNS
        );
        let row = sqlx::query_as::<_, Vacancy>(&query)
            .bind(Uuid::new_v4())
            .bind(vacancy.company_id)
            .bind(&vacancy.title)
            .bind(&vacancy.description)
            .bind(&vacancy.requirements)
            .bind(&vacancy.flyer_path)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_vacancies_by_company(&self, company_id: Uuid) -> Result<Vec<Vacancy>> {
        let query = format!(
            "SELECT {} FROM vacancies WHERE empresa_id = $1 ORDER BY fecha_creacion DESC, seq DESC",
            VACANCY_COLUMNS
        );
        let items = sqlx::query_as::<_, Vacancy>(&query)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn find_vacancy(&self, id: Uuid) -> Result<Option<Vacancy>> {
        let query = format!("SELECT {} FROM vacancies WHERE id = $1", VACANCY_COLUMNS);
        let row = sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_owned_vacancy(&self, id: Uuid, company_id: Uuid) -> Result<Option<Vacancy>> {
        let query = format!(
            "SELECT {} FROM vacancies WHERE id = $1 AND empresa_id = $2",
            VACANCY_COLUMNS
        );
        let row = sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_vacancy(&self, vacancy: &Vacancy) -> Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE vacancies
            SET
                titulo = $2,
                descripcion = $3,
                requisitos = $4,
                flayer_path = $5,
                activa = $6
            WHERE id = $1
            "#,
        )
        .bind(vacancy.id)
        .bind(&vacancy.title)
        .bind(&vacancy.description)
        .bind(&vacancy.requirements)
        .bind(&vacancy.flyer_path)
        .bind(vacancy.active)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn set_vacancy_active(&self, id: Uuid, company_id: Uuid, active: bool) -> Result<bool> {
        let res = sqlx::query("UPDATE vacancies SET activa = $3 WHERE id = $1 AND empresa_id = $2")
            .bind(id)
            .bind(company_id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn list_vacancies_with_company(&self) -> Result<Vec<VacancyWithCompany>> {
        let items = sqlx::query_as::<_, VacancyWithCompany>(
            r#"
            SELECT
                v.id,
                v.empresa_id,
                v.titulo,
                v.descripcion,
                v.requisitos,
                v.flayer_path,
                v.activa,
                v.fecha_creacion,
                c.nombre AS empresa_nombre
            FROM vacancies v
            INNER JOIN companies c ON c.id = v.empresa_id
            ORDER BY v.fecha_creacion DESC, v.seq DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn delete_vacancy(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}
