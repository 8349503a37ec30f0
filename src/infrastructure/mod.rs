// Infrastructure layer - External dependencies and adapters
pub mod chart_registry;
pub mod chartjs;
pub mod config;
pub mod file_source;
pub mod http_response;
pub mod http_source;
