pub mod auth_service;
pub mod upload_service;
pub mod vacancy_service;
