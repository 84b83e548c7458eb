pub mod application;
pub mod auth;
pub mod institute;
pub mod job;
pub mod job_view;
pub mod role;
pub mod specialty;
pub mod user;
