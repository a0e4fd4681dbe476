use std::sync::Arc;

use validator::Validate;

use crate::database::Store;
use crate::dto::auth_dto::{LoginPayload, RegisterPayload};
use crate::error::{Error, Result};
use crate::middleware::auth::SessionIdentity;
use crate::models::company::{Company, NewCompany};
use crate::utils::crypto::{hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<Company> {
        if payload.password != payload.confirm_password {
            return Err(Error::Validation("Passwords do not match".to_string()));
        }
        payload.validate()?;

        let email = payload.email.trim().to_string();
        if self.store.find_company_by_email(&email).await?.is_some() {
            return Err(Error::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let company = self
            .create_company(payload.name.trim().to_string(), email, &payload.password, false)
            .await?;
        tracing::info!(company_id = %company.id, "company registered");
        Ok(company)
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<SessionIdentity> {
        let email = payload.email.trim();
        let company = match self.store.find_company_by_email(email).await? {
            Some(company) if verify_password(&payload.password, &company.password_hash) => {
                company
            }
            _ => {
                tracing::warn!(email = %email, "failed login attempt");
                return Err(Error::Auth);
            }
        };

        Ok(SessionIdentity {
            company_id: company.id,
            name: company.name,
            is_admin: company.is_admin,
        })
    }

    /// Create the administrator account unless one with that email exists.
    /// Returns whether an account was created.
    pub async fn ensure_admin(&self, name: &str, email: &str, password: &str) -> Result<bool> {
        if self.store.find_company_by_email(email).await?.is_some() {
            return Ok(false);
        }
        let company = self
            .create_company(name.to_string(), email.to_string(), password, true)
            .await?;
        tracing::info!(company_id = %company.id, "administrator account created");
        Ok(true)
    }

    async fn create_company(
        &self,
        name: String,
        email: String,
        password: &str,
        is_admin: bool,
    ) -> Result<Company> {
        let password_hash = hash_password(password)
            .map_err(|e| Error::Internal(format!("password hashing failed: {}", e)))?;
        self.store
            .insert_company(NewCompany {
                name,
                email,
                password_hash,
                is_admin,
            })
            .await
    }
}
