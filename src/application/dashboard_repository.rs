// Collaborator traits for reading and building dashboard documents
use serde_json::{Map, Value};
use std::path::Path;

/// Kind of definition file a collection parser should pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Dashboard,
}

impl CollectionKind {
    pub fn file_suffix(&self) -> &'static str {
        match self {
            CollectionKind::Dashboard => crate::domain::dashboard::DASHBOARD_FILE_SUFFIX,
        }
    }
}

pub trait CollectionParser: Send + Sync {
    /// Parse every definition of `kind` found directly under `dir`.
    /// A missing directory is an empty collection.
    fn parse_collection(&self, dir: &Path, kind: CollectionKind) -> anyhow::Result<Vec<Value>>;
}

pub trait BaseDocumentFiller: Send + Sync {
    /// Merge generated base fields (id, slug, path, creation time) into `data`.
    fn fill_base(&self, path: &Path, slug: &str, data: Map<String, Value>) -> Map<String, Value>;
}
