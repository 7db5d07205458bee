// Collaborator traits for turning reports into query results
use crate::domain::report::{CompiledQuery, CompiledTopic, Schedule};
use async_trait::async_trait;
use serde_json::Value;

pub trait TopicResolver: Send + Sync {
    /// Load the compiled topic for `model` inside `namespace`.
    fn topic(&self, namespace: &str, model: &str) -> anyhow::Result<CompiledTopic>;
}

pub trait ScheduleResolver: Send + Sync {
    /// Find the schedule that loads `plugin_namespace`, if any.
    fn find_namespace_schedule(&self, plugin_namespace: &str) -> anyhow::Result<Option<Schedule>>;
}

#[async_trait]
pub trait SqlCompiler: Send + Sync {
    /// Compile a design and a query payload into SQL plus requested aggregates
    async fn compile(&self, design: &Value, query_payload: &Value) -> anyhow::Result<CompiledQuery>;
}

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run `sql` against the warehouse owned by `loader`
    async fn execute(&self, loader: &str, sql: &str) -> anyhow::Result<Vec<Value>>;
}
