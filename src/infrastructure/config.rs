use crate::domain::dashboard::ReportIdsPolicy;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub project_root: PathBuf,
    pub listen_addr: String,
    #[serde(default)]
    pub rename_report_ids: ReportIdsPolicy,
    pub gateway: GatewaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GatewaySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("project_root", ".")?
        .set_default("listen_addr", "0.0.0.0:8080")?
        .set_default("rename_report_ids", "same_members")?
        .set_default("gateway.base_url", "http://127.0.0.1:5010")?
        .set_default("gateway.timeout_secs", 30)
}

/// Defaults, then `config/dashboards.*`, then `DASHBOARDS__*` environment variables.
pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/dashboards").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARDS")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: ServiceConfig = builder().unwrap().build().unwrap().try_deserialize().unwrap();

        assert_eq!(config.project_root, PathBuf::from("."));
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.rename_report_ids, ReportIdsPolicy::SameMembers);
        assert_eq!(config.gateway.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboards.toml");
        std::fs::write(
            &path,
            "rename_report_ids = \"replace\"\n[gateway]\nbase_url = \"http://sql:9000\"\n",
        )
        .unwrap();

        let config: ServiceConfig = builder()
            .unwrap()
            .add_source(config::File::from(path))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.rename_report_ids, ReportIdsPolicy::Replace);
        assert_eq!(config.gateway.base_url, "http://sql:9000");
        assert_eq!(config.gateway.timeout_secs, 30);
    }
}
