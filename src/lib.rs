pub mod config;
pub mod database;
pub mod doc;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    institute_service::InstituteService, job_service::JobService,
    specialty_service::SpecialtyService, stats_service::StatsService, user_service::UserService,
    view_service::ViewService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub institute_service: InstituteService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub specialty_service: SpecialtyService,
    pub view_service: ViewService,
    pub stats_service: StatsService,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let auth_service = AuthService::new(pool.clone(), config.jwt_secret.clone());
        let user_service = UserService::new(pool.clone());
        let institute_service = InstituteService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let specialty_service = SpecialtyService::new(pool.clone());
        let view_service = ViewService::new(pool.clone());
        let stats_service = StatsService::new(pool.clone());

        Self {
            pool,
            config: Arc::new(config),
            auth_service,
            user_service,
            institute_service,
            job_service,
            application_service,
            specialty_service,
            view_service,
            stats_service,
        }
    }
}
