pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::database::Store;
use crate::middleware::auth::SessionManager;
use crate::services::{
    auth_service::AuthService, upload_service::UploadService, vacancy_service::VacancyService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionManager,
    pub uploads: UploadService,
    pub auth_service: AuthService,
    pub vacancy_service: VacancyService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn Store>) -> Self {
        let sessions = SessionManager::new(&config.session_secret, config.session_ttl_hours);
        let uploads = UploadService::new(config.uploads_dir.clone());
        let auth_service = AuthService::new(store.clone());
        let vacancy_service = VacancyService::new(store, uploads.clone());

        Self {
            config: Arc::new(config),
            sessions,
            uploads,
            auth_service,
            vacancy_service,
        }
    }
}
