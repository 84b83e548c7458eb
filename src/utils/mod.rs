pub mod crypto;
pub mod ownership;
pub mod time;
pub mod token;
pub mod validation;
