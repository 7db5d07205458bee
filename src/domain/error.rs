// Dashboard error taxonomy
use super::dashboard::Dashboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("a dashboard named '{}' already exists", .0.name)]
    AlreadyExists(Box<Dashboard>),
    #[error("dashboard does not exist")]
    DoesNotExist(serde_json::Value),
    #[error("no schedule found for namespace '{0}'")]
    ReportScheduleNotFound(String),
    #[error("no dashboard with id '{0}'")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
