// Dashboard lookup - Always re-scans the dashboards directory
use crate::application::dashboard_repository::{CollectionKind, CollectionParser};
use crate::domain::dashboard::Dashboard;
use crate::domain::error::{DashboardError, DashboardResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardLookup {
    dashboards_dir: PathBuf,
    parser: Arc<dyn CollectionParser>,
}

impl DashboardLookup {
    pub fn new(dashboards_dir: PathBuf, parser: Arc<dyn CollectionParser>) -> Self {
        Self {
            dashboards_dir,
            parser,
        }
    }

    pub fn dashboards_dir(&self) -> &Path {
        &self.dashboards_dir
    }

    /// Every dashboard on disk, in the order the parser yields them.
    pub fn list(&self) -> DashboardResult<Vec<Dashboard>> {
        let records = self
            .parser
            .parse_collection(&self.dashboards_dir, CollectionKind::Dashboard)?;

        let mut dashboards = Vec::with_capacity(records.len());
        for record in records {
            let slug = record.get("slug").cloned();
            match serde_json::from_value::<Dashboard>(record) {
                Ok(dashboard) => dashboards.push(dashboard),
                Err(e) => {
                    tracing::warn!("Skipping malformed dashboard (slug {:?}): {}", slug, e);
                }
            }
        }

        tracing::debug!(
            "Loaded {} dashboards from {}",
            dashboards.len(),
            self.dashboards_dir.display()
        );
        Ok(dashboards)
    }

    /// First dashboard with `id`; a missing id is an error.
    pub fn get_by_id(&self, id: &str) -> DashboardResult<Dashboard> {
        self.list()?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| DashboardError::NotFound(id.to_string()))
    }

    /// First dashboard named exactly `name`, if any.
    pub fn get_by_name(&self, name: &str) -> DashboardResult<Option<Dashboard>> {
        Ok(self.list()?.into_iter().find(|d| d.name == name))
    }
}
