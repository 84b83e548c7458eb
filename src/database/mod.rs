pub mod pool;
pub mod query;
