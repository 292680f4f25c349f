use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Persistent mapping from track descriptor to the destination item id it
/// resolved to in a previous run. Keys are normalized so casing differences
/// between runs do not miss the cache; entries are never overwritten once
/// present.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MatchCache {
    entries: BTreeMap<String, String>,
}

fn cache_key(descriptor: &str) -> String {
    descriptor.trim().to_lowercase()
}

impl MatchCache {
    /// Reads the cache file, returning an empty cache if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cache file {}", path.display()))?;
        let entries = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file {}", path.display()))?;
        Ok(Self { entries })
    }

    /// Writes the full mapping as pretty-printed JSON, replacing any
    /// previous file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write cache file {}", path.display()))?;
        Ok(())
    }

    pub fn get(&self, descriptor: &str) -> Option<&str> {
        self.entries.get(&cache_key(descriptor)).map(String::as_str)
    }

    pub fn insert(&mut self, descriptor: &str, item_id: String) {
        self.entries.entry(cache_key(descriptor)).or_insert(item_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
