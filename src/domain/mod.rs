// Domain layer - Dashboards, reports and their errors
pub mod dashboard;
pub mod error;
pub mod report;
