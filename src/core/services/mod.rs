pub mod config_service;
pub mod explore_service;
pub mod query_service;
pub mod traits;
pub mod types;
pub mod validation_service;
