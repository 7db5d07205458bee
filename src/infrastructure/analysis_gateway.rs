// SQL gateway client - Compiles designs and runs queries over HTTP
use crate::application::analysis_repository::{QueryExecutor, SqlCompiler};
use crate::domain::report::CompiledQuery;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AnalysisGateway {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    design: &'a Value,
    query_payload: &'a Value,
}

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    loader: &'a str,
    sql: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    rows: Vec<Value>,
    #[serde(default)]
    error: Option<String>,
}

impl AnalysisGateway {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build SQL gateway client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("SQL gateway request to {} failed with status {}: {}", url, status, body);
        }

        response
            .json::<R>()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

#[async_trait]
impl SqlCompiler for AnalysisGateway {
    async fn compile(&self, design: &Value, query_payload: &Value) -> Result<CompiledQuery> {
        let compiled: CompiledQuery = self
            .post("sql/compile", &CompileRequest {
                design,
                query_payload,
            })
            .await?;

        tracing::debug!("Compiled SQL: {}", compiled.sql);
        Ok(compiled)
    }
}

#[async_trait]
impl QueryExecutor for AnalysisGateway {
    async fn execute(&self, loader: &str, sql: &str) -> Result<Vec<Value>> {
        let response: ExecuteResponse = self
            .post("sql/execute", &ExecuteRequest { loader, sql })
            .await?;

        if let Some(error) = response.error {
            anyhow::bail!("Query on {} failed: {}", loader, error);
        }

        tracing::debug!("Loader {} returned {} rows", loader, response.rows.len());
        Ok(response.rows)
    }
}
