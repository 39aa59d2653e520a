pub mod auth_service;
pub mod mentor_service;
pub mod odd_validator;
pub mod plan_service;
pub mod summary_service;
