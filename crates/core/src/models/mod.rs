pub mod config;
pub mod plan;
pub mod settings;
pub mod summary;
pub mod tracker;
pub mod user;
