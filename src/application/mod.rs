// Application layer - Dashboard use cases and the collaborator traits they need
pub mod analysis_repository;
pub mod dashboard_lookup;
pub mod dashboard_repository;
pub mod dashboard_service;
pub mod dashboard_store;
pub mod report_resolver;
