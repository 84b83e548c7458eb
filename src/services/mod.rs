pub mod application_service;
pub mod auth_service;
pub mod institute_service;
pub mod job_service;
pub mod specialty_service;
pub mod stats_service;
pub mod user_service;
pub mod view_service;
