// Infrastructure layer - External dependencies and adapters
pub mod analysis_gateway;
pub mod config;
pub mod http_response;
pub mod m5o_collection;
pub mod project;
pub mod project_schedules;
pub mod topic_catalog;
