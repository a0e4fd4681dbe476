use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    #[sqlx(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(rename = "fecha_registro")]
    pub registered_at: DateTime<Utc>,
    #[sqlx(rename = "es_admin")]
    pub is_admin: bool,
}

/// A company row that has not been stored yet. The hash is produced by the
/// auth service; plaintext passwords never reach the store.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}
