pub mod application_dto;
pub mod auth_dto;
pub mod common_dto;
pub mod institute_dto;
pub mod job_dto;
pub mod specialty_dto;
pub mod stats_dto;
pub mod user_dto;
