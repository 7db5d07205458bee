// Report resolution - Compiles and runs each dashboard report in order
use crate::application::analysis_repository::{
    QueryExecutor, ScheduleResolver, SqlCompiler, TopicResolver,
};
use crate::domain::error::{DashboardError, DashboardResult};
use crate::domain::report::ReportReference;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReportResolver {
    topics: Arc<dyn TopicResolver>,
    schedules: Arc<dyn ScheduleResolver>,
    compiler: Arc<dyn SqlCompiler>,
    executor: Arc<dyn QueryExecutor>,
}

impl ReportResolver {
    pub fn new(
        topics: Arc<dyn TopicResolver>,
        schedules: Arc<dyn ScheduleResolver>,
        compiler: Arc<dyn SqlCompiler>,
        executor: Arc<dyn QueryExecutor>,
    ) -> Self {
        Self {
            topics,
            schedules,
            compiler,
            executor,
        }
    }

    /// Attach query results to every report, one at a time and in order.
    /// The first failure aborts the whole batch.
    pub async fn resolve(
        &self,
        mut reports: Vec<ReportReference>,
    ) -> DashboardResult<Vec<ReportReference>> {
        for report in reports.iter_mut() {
            self.resolve_one(report).await?;
        }
        Ok(reports)
    }

    async fn resolve_one(&self, report: &mut ReportReference) -> DashboardResult<()> {
        let topic = self.topics.topic(&report.namespace, &report.model)?;
        let design = topic.design(&report.design)?;

        let plugin_namespace = topic
            .plugin_namespace()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "topic {}/{} has no plugin_namespace",
                    report.namespace,
                    report.model
                )
            })?
            .to_string();
        let schedule = self
            .schedules
            .find_namespace_schedule(&plugin_namespace)?
            .ok_or(DashboardError::ReportScheduleNotFound(plugin_namespace))?;

        let compiled = self.compiler.compile(&design, &report.query_payload).await?;
        tracing::debug!(
            "Running report {}/{}:{} on loader {}",
            report.namespace,
            report.model,
            report.design,
            schedule.loader
        );

        let rows = self.executor.execute(&schedule.loader, &compiled.sql).await?;
        report.query_results = Some(rows);
        report.query_result_aggregates = Some(compiled.aggregates);
        Ok(())
    }
}
