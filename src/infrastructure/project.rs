// Project directory layout
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/analyze/<parts...>`
    pub fn analyze_dir(&self, parts: &[&str]) -> PathBuf {
        parts
            .iter()
            .fold(self.root.join("analyze"), |path, part| path.join(part))
    }

    pub fn dashboards_dir(&self) -> PathBuf {
        self.analyze_dir(&["dashboards"])
    }

    /// Where compiled topics live: `<root>/.meltano/models`
    pub fn models_dir(&self) -> PathBuf {
        self.root.join(".meltano").join("models")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("meltano.yml")
    }
}
