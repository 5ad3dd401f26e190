pub mod distance;
pub mod repository;
pub mod types;
pub mod validation;
