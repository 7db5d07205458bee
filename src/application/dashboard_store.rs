// Dashboard store - One JSON document per dashboard, keyed by slug
use crate::application::dashboard_lookup::DashboardLookup;
use crate::application::dashboard_repository::BaseDocumentFiller;
use crate::domain::dashboard::{
    dashboard_path, slugify, Dashboard, DashboardSettings, NewDashboard, ReportIdsPolicy,
    DASHBOARD_VERSION,
};
use crate::domain::error::{DashboardError, DashboardResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Owns every write to the dashboards directory.
///
/// There is no locking: uniqueness checks read the directory and then write,
/// so two processes creating the same name at once can both succeed.
#[derive(Clone)]
pub struct DashboardStore {
    lookup: DashboardLookup,
    filler: Arc<dyn BaseDocumentFiller>,
    report_ids_policy: ReportIdsPolicy,
}

impl DashboardStore {
    pub fn new(
        lookup: DashboardLookup,
        filler: Arc<dyn BaseDocumentFiller>,
        report_ids_policy: ReportIdsPolicy,
    ) -> Self {
        Self {
            lookup,
            filler,
            report_ids_policy,
        }
    }

    pub fn lookup(&self) -> &DashboardLookup {
        &self.lookup
    }

    /// Storage location for `slug`.
    pub fn path_for(&self, slug: &str) -> PathBuf {
        dashboard_path(self.lookup.dashboards_dir(), slug)
    }

    pub fn create(&self, new: NewDashboard) -> DashboardResult<Dashboard> {
        if let Some(existing) = self.lookup.get_by_name(&new.name)? {
            return Err(DashboardError::AlreadyExists(Box::new(existing)));
        }

        let slug = slugify(&new.name);
        let path = self.path_for(&slug);
        if path.exists() {
            tracing::warn!(
                "Dashboard '{}' overwrites existing file {}",
                new.name,
                path.display()
            );
        }

        let mut data = new.extra;
        data.insert("name".to_string(), Value::String(new.name));
        let mut data = self.filler.fill_base(&path, &slug, data);
        data.insert("version".to_string(), Value::from(DASHBOARD_VERSION));
        data.insert(
            "description".to_string(),
            Value::String(new.description.unwrap_or_default()),
        );
        data.insert("report_ids".to_string(), Value::Array(Vec::new()));

        let dashboard: Dashboard = serde_json::from_value(Value::Object(data))?;
        fs::create_dir_all(self.lookup.dashboards_dir())?;
        write_document(&path, &dashboard)?;

        tracing::info!(id = %dashboard.id, slug = %dashboard.slug, "Created dashboard");
        Ok(dashboard)
    }

    /// Rename/describe a dashboard and move its file to the new slug.
    ///
    /// The new document is written before the old file is removed, so a crash
    /// in between leaves both files rather than neither.
    pub fn rename(
        &self,
        mut dashboard: Dashboard,
        settings: DashboardSettings,
    ) -> DashboardResult<Dashboard> {
        let old_path = self.path_for(&dashboard.slug);
        let new_slug = slugify(&settings.name);
        let new_path = self.path_for(&new_slug);
        let same_file = new_slug == dashboard.slug;

        if !same_file && new_path.exists() {
            let existing: Dashboard = serde_json::from_str(&fs::read_to_string(&new_path)?)?;
            return Err(DashboardError::AlreadyExists(Box::new(existing)));
        }

        let old_slug = std::mem::replace(&mut dashboard.slug, new_slug);
        dashboard.name = settings.name;
        dashboard.description = settings.description.unwrap_or_default();
        dashboard.path = new_path.display().to_string();

        let apply_report_ids = match self.report_ids_policy {
            ReportIdsPolicy::SameMembers => dashboard.same_report_members(&settings.report_ids),
            ReportIdsPolicy::Replace => true,
        };
        if apply_report_ids {
            dashboard.report_ids = settings.report_ids;
        } else {
            tracing::debug!(
                id = %dashboard.id,
                "Ignoring report_ids with different members on rename"
            );
        }

        write_document(&new_path, &dashboard)?;
        if !same_file {
            fs::remove_file(&old_path)?;
        }

        tracing::info!(id = %dashboard.id, from = %old_slug, to = %dashboard.slug, "Renamed dashboard");
        Ok(dashboard)
    }

    pub fn delete(&self, dashboard: &Dashboard) -> DashboardResult<()> {
        let path = self.path_for(&dashboard.slug);
        if !path.exists() {
            return Err(DashboardError::DoesNotExist(serde_json::to_value(dashboard)?));
        }

        fs::remove_file(&path)?;
        tracing::info!(id = %dashboard.id, slug = %dashboard.slug, "Deleted dashboard");
        Ok(())
    }

    pub fn add_report(&self, mut dashboard: Dashboard, report_id: &str) -> DashboardResult<Dashboard> {
        if !dashboard.has_report(report_id) {
            dashboard.report_ids.push(report_id.to_string());
            write_document(&self.path_for(&dashboard.slug), &dashboard)?;
            tracing::info!(id = %dashboard.id, report_id, "Added report to dashboard");
        }
        Ok(dashboard)
    }

    pub fn remove_report(
        &self,
        mut dashboard: Dashboard,
        report_id: &str,
    ) -> DashboardResult<Dashboard> {
        if let Some(position) = dashboard.report_ids.iter().position(|id| id == report_id) {
            dashboard.report_ids.remove(position);
            write_document(&self.path_for(&dashboard.slug), &dashboard)?;
            tracing::info!(id = %dashboard.id, report_id, "Removed report from dashboard");
        }
        Ok(dashboard)
    }
}

/// Write through a sibling temp file and move it into place.
/// The temp file is removed again if either step fails.
fn write_document(path: &Path, dashboard: &Dashboard) -> DashboardResult<()> {
    let contents = serde_json::to_string(dashboard)?;
    let temp_path = path.with_extension("m5o.tmp");

    let written = fs::write(&temp_path, contents).and_then(|()| fs::rename(&temp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}
