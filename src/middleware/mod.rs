pub mod auth;
pub mod cors;
pub mod view_tracker;
