// Report reference and analysis domain models
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A report a dashboard points at, as sent by the caller for resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportReference {
    pub namespace: String,
    pub model: String,
    pub design: String,
    #[serde(default)]
    pub query_payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_results: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_result_aggregates: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A compiled topic (`.topic.m5oc`) holding one or more designs.
#[derive(Debug, Clone)]
pub struct CompiledTopic {
    pub content: Value,
}

impl CompiledTopic {
    pub fn new(content: Value) -> Self {
        Self { content }
    }

    pub fn plugin_namespace(&self) -> Option<&str> {
        self.content.get("plugin_namespace").and_then(Value::as_str)
    }

    /// Look up a design by name.
    pub fn design(&self, name: &str) -> anyhow::Result<Value> {
        self.content
            .get("designs")
            .and_then(Value::as_array)
            .and_then(|designs| {
                designs
                    .iter()
                    .find(|d| d.get("name").and_then(Value::as_str) == Some(name))
            })
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("design '{}' not found in topic", name))
    }
}

/// SQL produced for a design plus the aggregates it requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledQuery {
    pub sql: String,
    #[serde(default)]
    pub aggregates: Value,
}

/// A pipeline schedule; `loader` names the execution target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Schedule {
    pub name: String,
    pub extractor: String,
    pub loader: String,
    #[serde(default)]
    pub transform: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
}
