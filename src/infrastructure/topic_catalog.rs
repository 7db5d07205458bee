// Compiled topic lookup from the project's models directory
use crate::application::analysis_repository::TopicResolver;
use crate::domain::report::CompiledTopic;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CompiledTopicCatalog {
    models_dir: PathBuf,
}

impl CompiledTopicCatalog {
    pub fn new(models_dir: PathBuf) -> Self {
        Self { models_dir }
    }

    fn topic_path(&self, namespace: &str, model: &str) -> PathBuf {
        self.models_dir
            .join(namespace)
            .join(format!("{}.topic.m5oc", model))
    }
}

impl TopicResolver for CompiledTopicCatalog {
    fn topic(&self, namespace: &str, model: &str) -> Result<CompiledTopic> {
        let path = self.topic_path(namespace, model);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read compiled topic {}", path.display()))?;
        let content = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse compiled topic {}", path.display()))?;
        Ok(CompiledTopic::new(content))
    }
}
