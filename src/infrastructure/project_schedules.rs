// Schedule lookup from the project manifest (meltano.yml)
use crate::application::analysis_repository::ScheduleResolver;
use crate::domain::report::Schedule;
use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
struct ProjectManifest {
    #[serde(default)]
    plugins: ManifestPlugins,
    #[serde(default)]
    schedules: Vec<Schedule>,
}

#[derive(Debug, Default, Deserialize)]
struct ManifestPlugins {
    #[serde(default)]
    extractors: Vec<ManifestPlugin>,
}

#[derive(Debug, Deserialize)]
struct ManifestPlugin {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
}

/// Reads the manifest on every lookup so schedule edits apply without a restart.
#[derive(Debug, Clone)]
pub struct ProjectScheduleResolver {
    manifest_path: PathBuf,
}

impl ProjectScheduleResolver {
    pub fn new(manifest_path: PathBuf) -> Self {
        Self { manifest_path }
    }

    fn load_manifest(&self) -> Result<ProjectManifest> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(self.manifest_path.clone())
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl ScheduleResolver for ProjectScheduleResolver {
    fn find_namespace_schedule(&self, plugin_namespace: &str) -> Result<Option<Schedule>> {
        let manifest = self.load_manifest()?;

        let extractors: Vec<&str> = manifest
            .plugins
            .extractors
            .iter()
            .filter(|p| p.namespace.as_deref() == Some(plugin_namespace))
            .map(|p| p.name.as_str())
            .collect();

        let schedule = manifest
            .schedules
            .into_iter()
            .find(|s| extractors.contains(&s.extractor.as_str()));

        if schedule.is_none() {
            tracing::debug!("No schedule extracts namespace {}", plugin_namespace);
        }
        Ok(schedule)
    }
}
