// Dashboard service - Request-level use cases over the store and resolver
use crate::application::dashboard_store::DashboardStore;
use crate::application::report_resolver::ReportResolver;
use crate::domain::dashboard::{Dashboard, DashboardSettings, NewDashboard};
use crate::domain::error::{DashboardError, DashboardResult};
use crate::domain::report::ReportReference;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifies a dashboard by id; any other fields the caller sent ride along.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardRef {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDashboardRequest {
    pub dashboard: DashboardRef,
    pub new_settings: DashboardSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMembershipRequest {
    pub dashboard_id: String,
    pub report_id: String,
}

/// Dashboard reads and writes are blocking `std::fs` calls made on the
/// caller's thread; only report resolution awaits.
#[derive(Clone)]
pub struct DashboardService {
    store: DashboardStore,
    resolver: ReportResolver,
}

impl DashboardService {
    pub fn new(store: DashboardStore, resolver: ReportResolver) -> Self {
        Self { store, resolver }
    }

    pub fn get_dashboards(&self) -> DashboardResult<Vec<Dashboard>> {
        self.store.lookup().list()
    }

    pub fn get_dashboard(&self, dashboard_id: &str) -> DashboardResult<Dashboard> {
        self.store.lookup().get_by_id(dashboard_id)
    }

    pub fn save_dashboard(&self, new: NewDashboard) -> DashboardResult<Dashboard> {
        self.store.create(new)
    }

    pub fn update_dashboard(&self, request: UpdateDashboardRequest) -> DashboardResult<Dashboard> {
        let dashboard = self.store.lookup().get_by_id(&request.dashboard.id)?;
        if !self.store.path_for(&dashboard.slug).exists() {
            return Err(DashboardError::DoesNotExist(serde_json::to_value(&request)?));
        }

        self.store.rename(dashboard, request.new_settings)
    }

    pub fn delete_dashboard(&self, request: DashboardRef) -> DashboardResult<DashboardRef> {
        let dashboard = self.store.lookup().get_by_id(&request.id)?;
        match self.store.delete(&dashboard) {
            Ok(()) => Ok(request),
            Err(DashboardError::DoesNotExist(_)) => {
                Err(DashboardError::DoesNotExist(serde_json::to_value(&request)?))
            }
            Err(e) => Err(e),
        }
    }

    pub fn add_report_to_dashboard(
        &self,
        request: ReportMembershipRequest,
    ) -> DashboardResult<Dashboard> {
        let dashboard = self.store.lookup().get_by_id(&request.dashboard_id)?;
        self.store.add_report(dashboard, &request.report_id)
    }

    pub fn remove_report_from_dashboard(
        &self,
        request: ReportMembershipRequest,
    ) -> DashboardResult<Dashboard> {
        let dashboard = self.store.lookup().get_by_id(&request.dashboard_id)?;
        self.store.remove_report(dashboard, &request.report_id)
    }

    pub async fn get_dashboard_reports_with_query_results(
        &self,
        reports: Vec<ReportReference>,
    ) -> DashboardResult<Vec<ReportReference>> {
        self.resolver.resolve(reports).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::analysis_repository::{
        QueryExecutor, ScheduleResolver, SqlCompiler, TopicResolver,
    };
    use crate::application::dashboard_lookup::DashboardLookup;
    use crate::domain::dashboard::ReportIdsPolicy;
    use crate::domain::report::{CompiledQuery, CompiledTopic, Schedule};
    use crate::infrastructure::m5o_collection::{M5oBaseFiller, M5oCollectionParser};
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    pub(crate) struct StaticAnalysis;

    impl TopicResolver for StaticAnalysis {
        fn topic(&self, namespace: &str, _model: &str) -> anyhow::Result<CompiledTopic> {
            Ok(CompiledTopic::new(json!({
                "plugin_namespace": namespace,
                "designs": [{"name": "main"}]
            })))
        }
    }

    impl ScheduleResolver for StaticAnalysis {
        fn find_namespace_schedule(&self, plugin_namespace: &str) -> anyhow::Result<Option<Schedule>> {
            Ok((plugin_namespace == "tap_carbon").then(|| Schedule {
                name: "carbon".to_string(),
                extractor: "tap-carbon-intensity".to_string(),
                loader: "target-postgres".to_string(),
                transform: None,
                interval: None,
            }))
        }
    }

    #[async_trait]
    impl SqlCompiler for StaticAnalysis {
        async fn compile(&self, _design: &Value, _query_payload: &Value) -> anyhow::Result<CompiledQuery> {
            Ok(CompiledQuery {
                sql: "SELECT 1".to_string(),
                aggregates: json!([]),
            })
        }
    }

    #[async_trait]
    impl QueryExecutor for StaticAnalysis {
        async fn execute(&self, _loader: &str, _sql: &str) -> anyhow::Result<Vec<Value>> {
            Ok(vec![json!({"value": 1})])
        }
    }

    pub(crate) fn service_in(root: &Path) -> DashboardService {
        let lookup = DashboardLookup::new(
            root.join("analyze").join("dashboards"),
            Arc::new(M5oCollectionParser),
        );
        let store = DashboardStore::new(lookup, Arc::new(M5oBaseFiller), ReportIdsPolicy::SameMembers);
        let analysis = Arc::new(StaticAnalysis);
        let resolver = ReportResolver::new(
            analysis.clone(),
            analysis.clone(),
            analysis.clone(),
            analysis,
        );
        DashboardService::new(store, resolver)
    }

    fn service() -> (TempDir, DashboardService) {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());
        (dir, service)
    }

    fn save(service: &DashboardService, name: &str) -> Dashboard {
        service
            .save_dashboard(NewDashboard {
                name: name.to_string(),
                ..Default::default()
            })
            .unwrap()
    }

    fn dashboard_ref(id: &str) -> DashboardRef {
        DashboardRef {
            id: id.to_string(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_update_by_id() {
        let (_dir, service) = service();
        let created = save(&service, "Sales Overview");

        let updated = service
            .update_dashboard(UpdateDashboardRequest {
                dashboard: dashboard_ref(&created.id),
                new_settings: DashboardSettings {
                    name: "Sales Detail".to_string(),
                    description: None,
                    report_ids: Vec::new(),
                },
            })
            .unwrap();

        assert_eq!(updated.slug, "sales-detail");
        assert_eq!(service.get_dashboard(&created.id).unwrap(), updated);
        assert_eq!(service.get_dashboards().unwrap().len(), 1);
    }

    #[test]
    fn test_update_without_backing_file_carries_request() {
        let (dir, service) = service();
        let dashboards = dir.path().join("analyze").join("dashboards");
        std::fs::create_dir_all(&dashboards).unwrap();
        // Stored under a file name that no longer matches its slug.
        std::fs::write(
            dashboards.join("legacy.dashboard.m5o"),
            json!({"id": "d-1", "name": "Ops", "slug": "ops", "report_ids": []}).to_string(),
        )
        .unwrap();

        let err = service
            .update_dashboard(UpdateDashboardRequest {
                dashboard: dashboard_ref("d-1"),
                new_settings: DashboardSettings {
                    name: "Ops 2".to_string(),
                    description: None,
                    report_ids: Vec::new(),
                },
            })
            .unwrap_err();

        match err {
            DashboardError::DoesNotExist(payload) => {
                assert_eq!(payload["dashboard"]["id"], "d-1");
                assert_eq!(payload["new_settings"]["name"], "Ops 2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(dashboards.join("legacy.dashboard.m5o").exists());
    }

    #[test]
    fn test_delete_twice_reports_request() {
        let (_dir, service) = service();
        let created = save(&service, "Ops");

        service.delete_dashboard(dashboard_ref(&created.id)).unwrap();

        // Once the file is gone the id no longer resolves at all.
        let err = service.delete_dashboard(dashboard_ref(&created.id)).unwrap_err();
        assert!(matches!(err, DashboardError::NotFound(id) if id == created.id));
    }

    #[test]
    fn test_membership_requests() {
        let (_dir, service) = service();
        let created = save(&service, "Ops");
        let request = |report_id: &str| ReportMembershipRequest {
            dashboard_id: created.id.clone(),
            report_id: report_id.to_string(),
        };

        service.add_report_to_dashboard(request("r1")).unwrap();
        let twice = service.add_report_to_dashboard(request("r1")).unwrap();
        assert_eq!(twice.report_ids, vec!["r1"]);

        let removed = service.remove_report_from_dashboard(request("r1")).unwrap();
        assert!(removed.report_ids.is_empty());
        assert!(service.get_dashboard(&created.id).unwrap().report_ids.is_empty());
    }

    #[tokio::test]
    async fn test_reports_with_query_results() {
        let (_dir, service) = service();
        let reports: Vec<ReportReference> = serde_json::from_value(json!([
            {"namespace": "tap_carbon", "model": "region", "design": "main", "query_payload": {}},
            {"namespace": "tap_gitlab", "model": "commits", "design": "main", "query_payload": {}}
        ]))
        .unwrap();

        let err = service
            .get_dashboard_reports_with_query_results(reports.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::ReportScheduleNotFound(ns) if ns == "tap_gitlab"));

        let resolved = service
            .get_dashboard_reports_with_query_results(reports[..1].to_vec())
            .await
            .unwrap();
        assert_eq!(resolved[0].query_results, Some(vec![json!({"value": 1})]));
    }
}
