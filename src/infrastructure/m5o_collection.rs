// Filesystem-backed m5o collection parser and base document filler
use crate::application::dashboard_repository::{BaseDocumentFiller, CollectionKind, CollectionParser};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct M5oCollectionParser;

impl CollectionParser for M5oCollectionParser {
    fn parse_collection(&self, dir: &Path, kind: CollectionKind) -> Result<Vec<Value>> {
        if !dir.is_dir() {
            tracing::debug!("Collection directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.ends_with(kind.file_suffix()))
                .unwrap_or(false);
            if matches && path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let mut records = Vec::with_capacity(files.len());
        for path in files {
            let parsed = fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|text| serde_json::from_str::<Value>(&text).map_err(anyhow::Error::from));
            match parsed {
                Ok(value) => records.push(value),
                Err(e) => {
                    tracing::warn!("Skipping unreadable definition {}: {}", path.display(), e);
                }
            }
        }

        Ok(records)
    }
}

#[derive(Debug, Clone, Default)]
pub struct M5oBaseFiller;

impl BaseDocumentFiller for M5oBaseFiller {
    fn fill_base(&self, path: &Path, slug: &str, mut data: Map<String, Value>) -> Map<String, Value> {
        let now = chrono::Utc::now();
        let created_at = now.timestamp_millis() as f64 / 1000.0;

        data.insert("path".to_string(), Value::String(path.display().to_string()));
        data.insert("slug".to_string(), Value::String(slug.to_string()));
        data.insert("id".to_string(), Value::String(uuid::Uuid::new_v4().to_string()));
        data.insert("createdAt".to_string(), Value::from(created_at));
        data
    }
}
