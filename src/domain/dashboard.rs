// Dashboard domain model
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Schema tag written into every new dashboard document.
pub const DASHBOARD_VERSION: &str = "1.0.0";

/// File suffix shared by every dashboard document.
pub const DASHBOARD_FILE_SUFFIX: &str = ".dashboard.m5o";

/// A dashboard as persisted in `<slug>.dashboard.m5o`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub report_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<f64>,
    /// Caller-supplied fields this layer does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Dashboard {
    pub fn has_report(&self, report_id: &str) -> bool {
        self.report_ids.iter().any(|id| id == report_id)
    }

    /// True when `candidate` holds exactly the same members as `report_ids`,
    /// ignoring order and repetition.
    pub fn same_report_members(&self, candidate: &[String]) -> bool {
        let current: HashSet<&str> = self.report_ids.iter().map(String::as_str).collect();
        let proposed: HashSet<&str> = candidate.iter().map(String::as_str).collect();
        current == proposed
    }
}

/// Input for creating a dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDashboard {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Settings applied by a rename/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub report_ids: Vec<String>,
}

/// How a rename treats the `report_ids` it is handed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportIdsPolicy {
    /// Apply the new list only when it has the same members as the current one.
    #[default]
    SameMembers,
    /// Always apply the new list.
    Replace,
}

/// Convert a display name to a filesystem-safe kebab-case slug.
///
/// Example: "Sales Overview" → "sales-overview"
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn dashboard_file_name(slug: &str) -> String {
    format!("{}{}", slug, DASHBOARD_FILE_SUFFIX)
}

pub fn dashboard_path(dir: &Path, slug: &str) -> PathBuf {
    dir.join(dashboard_file_name(slug))
}
