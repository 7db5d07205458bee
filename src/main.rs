// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_lookup::DashboardLookup;
use crate::application::dashboard_service::DashboardService;
use crate::application::dashboard_store::DashboardStore;
use crate::application::report_resolver::ReportResolver;
use crate::infrastructure::analysis_gateway::AnalysisGateway;
use crate::infrastructure::config::load_service_config;
use crate::infrastructure::m5o_collection::{M5oBaseFiller, M5oCollectionParser};
use crate::infrastructure::project::Project;
use crate::infrastructure::project_schedules::ProjectScheduleResolver;
use crate::infrastructure::topic_catalog::CompiledTopicCatalog;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::dashboards_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_service_config()?;
    let project = Project::new(config.project_root.clone());
    tracing::info!("Serving dashboards for project {}", project.root().display());

    // Infrastructure adapters
    let lookup = DashboardLookup::new(project.dashboards_dir(), Arc::new(M5oCollectionParser));
    let gateway = Arc::new(AnalysisGateway::new(
        config.gateway.base_url.clone(),
        config.gateway.timeout(),
    )?);

    // Application services
    let store = DashboardStore::new(lookup, Arc::new(M5oBaseFiller), config.rename_report_ids);
    let resolver = ReportResolver::new(
        Arc::new(CompiledTopicCatalog::new(project.models_dir())),
        Arc::new(ProjectScheduleResolver::new(project.manifest_path())),
        gateway.clone(),
        gateway,
    );
    let state = Arc::new(AppState {
        dashboard_service: DashboardService::new(store, resolver),
    });

    let router = dashboards_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    tracing::info!("Starting analyze-dashboards service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
