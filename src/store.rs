//! Collaborators of the article pipeline: selected images, manual tags and
//! the article index.
//!
//! The core (normalize + render) never touches these; the pipeline in
//! `lib.rs` receives them as trait objects so callers decide where the data
//! lives.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An image ready to embed: `data_url` is a complete `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub id: String,
    pub name: String,
    pub data_url: String,
}

/// Reference to an embedded image, as recorded in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: String,
    pub name: String,
}

/// One entry of the article index (`articles-index.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD`; entries sort on it as text.
    pub date: String,
    pub author: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub content_file: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

pub trait ImageProvider {
    /// Images to embed, in selection order.
    fn selected_images(&self) -> Vec<ImageAsset>;
}

impl ImageProvider for Vec<ImageAsset> {
    fn selected_images(&self) -> Vec<ImageAsset> {
        self.clone()
    }
}

pub trait TagStore {
    /// Returns false for blank or already present tags.
    fn add(&mut self, tag: &str) -> bool;
    fn remove(&mut self, tag: &str) -> bool;
    fn tags(&self) -> Vec<String>;
    fn clear(&mut self);
}

pub trait ArticleIndex {
    /// Replace the entry with the same id in place, or insert at the front;
    /// then order by date, newest first.
    fn upsert(&mut self, entry: IndexEntry);
    fn remove(&mut self, id: &str) -> bool;
    fn entries(&self) -> &[IndexEntry];

    fn by_tag(&self, tag: &str) -> Vec<&IndexEntry> {
        self.entries()
            .iter()
            .filter(|e| e.tags.iter().any(|t| t == tag))
            .collect()
    }

    /// Every tag in use, in order of first appearance.
    fn all_tags(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for tag in self.entries().iter().flat_map(|e| e.tags.iter()) {
            if !out.contains(tag) {
                out.push(tag.clone());
            }
        }
        out
    }
}

/// Manually entered tags, unique and in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagStore for TagSet {
    fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    fn tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn clear(&mut self) {
        self.tags.clear();
    }
}

/// Uploaded images plus the subset selected for the current article.
#[derive(Debug, Clone, Default)]
pub struct ImageLibrary {
    images: Vec<ImageAsset>,
    selected: Vec<String>,
}

impl ImageLibrary {
    /// Newest first.
    pub fn add(&mut self, image: ImageAsset) {
        self.images.insert(0, image);
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|img| img.id != id);
        self.selected.retain(|s| s != id);
        self.images.len() != before
    }

    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    /// Select or deselect an image. Returns whether it is selected afterwards;
    /// unknown ids are never selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.images.iter().any(|img| img.id == id) {
            return false;
        }
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id.to_string());
            true
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}

impl ImageProvider for ImageLibrary {
    fn selected_images(&self) -> Vec<ImageAsset> {
        self.selected
            .iter()
            .filter_map(|id| self.images.iter().find(|img| &img.id == id))
            .cloned()
            .collect()
    }
}

/// The article index kept as a pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct IndexFile {
    path: PathBuf,
    entries: Vec<IndexEntry>,
}

impl IndexFile {
    /// Load the index at `path`. A missing file is an empty index.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let entries: Vec<IndexEntry> = if path.exists() {
            let text = fs::read_to_string(path)?;
            serde_json::from_str(&text)
                .map_err(|e| format!("invalid article index {}: {e}", path.display()))?
        } else {
            debug!(path = %path.display(), "no article index yet, starting empty");
            Vec::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, self.export()?)?;
        info!(path = %self.path.display(), entries = self.entries.len(), "saved article index");
        Ok(())
    }

    pub fn export(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }

    /// Replace all entries with a previously exported index. Anything but a
    /// JSON array of entries is rejected and leaves the index untouched.
    pub fn import(&mut self, json: &str) -> Result<usize, Box<dyn Error>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_array() {
            return Err("article index import must be a JSON array".into());
        }
        self.entries = serde_json::from_value(value)?;
        Ok(self.entries.len())
    }
}

impl ArticleIndex for IndexFile {
    fn upsert(&mut self, entry: IndexEntry) {
        match self.entries.iter().position(|e| e.id == entry.id) {
            Some(pos) => {
                debug!(id = %entry.id, "replacing index entry");
                self.entries[pos] = entry;
            }
            None => {
                debug!(id = %entry.id, "adding index entry");
                self.entries.insert(0, entry);
            }
        }
        self.entries.sort_by(|a, b| b.date.cmp(&a.date));
    }

    fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, date: &str, tags: &[&str]) -> IndexEntry {
        IndexEntry {
            id: id.to_string(),
            title: id.to_uppercase(),
            date: date.to_string(),
            author: "a".to_string(),
            summary: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content_file: format!("posts/{id}.html"),
            images: vec![],
        }
    }

    fn asset(id: &str) -> ImageAsset {
        ImageAsset {
            id: id.to_string(),
            name: format!("{id}.png"),
            data_url: "data:image/png;base64,AAAA".to_string(),
        }
    }

    #[test]
    fn tag_set_rejects_blank_and_duplicate_tags() {
        let mut tags = TagSet::default();
        assert!(tags.add(" rust "));
        assert!(!tags.add("rust"));
        assert!(!tags.add("   "));
        assert!(tags.add("web"));
        assert_eq!(tags.tags(), vec!["rust", "web"]);
        assert!(tags.remove("rust"));
        assert!(!tags.remove("rust"));
        tags.clear();
        assert!(tags.tags().is_empty());
    }

    #[test]
    fn image_library_keeps_selection_order() {
        let mut lib = ImageLibrary::default();
        lib.add(asset("a"));
        lib.add(asset("b"));
        assert_eq!(lib.images()[0].id, "b");

        assert!(lib.toggle("a"));
        assert!(lib.toggle("b"));
        assert!(!lib.toggle("missing"));
        let ids: Vec<_> = lib.selected_images().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a", "b"]);

        assert!(!lib.toggle("a"));
        assert!(lib.remove("b"));
        assert!(lib.selected_images().is_empty());
    }

    #[test]
    fn upsert_replaces_by_id_and_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = IndexFile::load(&dir.path().join("idx.json")).unwrap();
        index.upsert(entry("old", "2024-01-01", &["x"]));
        index.upsert(entry("new", "2025-06-01", &["y", "x"]));
        index.upsert(entry("old", "2024-01-01", &["z"]));

        let ids: Vec<_> = index.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(index.entries()[1].tags, vec!["z"]);
        assert_eq!(index.all_tags(), vec!["y", "x", "z"]);
        assert_eq!(index.by_tag("x").len(), 1);
    }

    #[test]
    fn index_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("articles-index.json");
        let mut index = IndexFile::load(&path).unwrap();
        index.upsert(entry("a", "2025-01-01", &[]));
        index.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"contentFile\": \"posts/a.html\""), "{text}");

        let back = IndexFile::load(&path).unwrap();
        assert_eq!(back.entries(), index.entries());
        assert!(IndexFile::load(&path).unwrap().remove("a"));
    }

    #[test]
    fn import_accepts_only_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = IndexFile::load(&dir.path().join("i.json")).unwrap();
        index.upsert(entry("keep", "2025-01-01", &[]));

        assert!(index.import(r#"{"id": "x"}"#).is_err());
        assert_eq!(index.entries().len(), 1);

        let exported = index.export().unwrap();
        let mut other = IndexFile::load(&dir.path().join("j.json")).unwrap();
        assert_eq!(other.import(&exported).unwrap(), 1);
        assert_eq!(other.entries()[0].id, "keep");
    }
}
