use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Origins allowed to make credentialed cross-origin requests. Empty means
    /// same-origin only.
    pub cors_allowed_origins: Vec<String>,
    pub admin: Option<AdminBootstrap>,
}

/// Credentials for the administrator account created on startup when absent.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let admin = match (env::var("ADMIN_EMAIL").ok(), env::var("ADMIN_PASSWORD").ok()) {
            (Some(email), Some(password)) => Some(AdminBootstrap {
                name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string()),
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            session_secret: get_env("SESSION_SECRET")?,
            session_ttl_hours: get_env_parse_or("SESSION_TTL_HOURS", 12)?,
            uploads_dir: env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./static")),
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            cors_allowed_origins: parse_origins(
                &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            )?,
            admin,
        })
    }

    /// `DATABASE_URL=memory` runs the portal without a database server.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.eq_ignore_ascii_case("memory")
    }
}

/// Comma-separated list of exact origins such as `https://portal.example.com`.
fn parse_origins(raw: &str) -> Result<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" || axum::http::HeaderValue::from_str(origin).is_err() {
                return Err(Error::Config(format!("Invalid CORS origin: {}", origin)));
            }
            Ok(origin.trim_end_matches('/').to_string())
        })
        .collect()
}

fn get_env(name: &str) -> Result<String> {
    let value =
        env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))?;
    if value.trim().is_empty() {
        return Err(Error::Config(format!("Empty environment variable: {}", name)));
    }
    Ok(value)
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
