use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// Metadata of one archived story, as the archiver writes it to
/// `fanfics/<site>/<id>/metadata.json`.
///
/// The record is immutable once read; every pipeline works on the
/// collected list and never writes metadata back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryMetadata {
    pub language: String,
    pub siteabbrev: String,
    #[serde(rename = "storyId")]
    pub story_id: String,
    pub rating: String,
    /// Raw pairing groups. An inner group may hold a single name or more
    /// than two names; normalization happens in [`crate::pairings`].
    #[serde(default)]
    pub ships: Vec<Vec<String>>,
    #[serde(default)]
    pub reviews: i64,
    #[serde(default)]
    pub follows: i64,
    #[serde(default)]
    pub favs: i64,
    #[serde(rename = "numWords", default)]
    pub num_words: i64,
    #[serde(rename = "numChapters", default)]
    pub num_chapters: i64,
}

/// An archive project on disk.
///
/// The project root contains a `fanfics/` directory laid out as
/// `fanfics/<siteabbrev>/<storyId>/` with `metadata.json` and
/// `story.html` per story.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Open a project, failing early if `root` does not look like one.
    pub fn open<P: Into<PathBuf>>(root: P) -> Result<Self, String> {
        let root = root.into();
        if !root.join("fanfics").is_dir() {
            return Err(format!(
                "{} is not an archive project (missing fanfics/ directory)",
                root.display()
            ));
        }
        Ok(Project { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect the metadata of every story in the archive.
    ///
    /// Traversal is sorted by path, so the returned order is stable across
    /// runs. A missing or unparsable `metadata.json` aborts the whole
    /// collection.
    pub fn collect_metadata(&self) -> Result<Vec<StoryMetadata>, String> {
        let mut all = Vec::new();
        for entry in WalkDir::new(self.root.join("fanfics"))
            .min_depth(3)
            .max_depth(3)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| format!("Walk project failed: {e}"))?;
            if !entry.file_type().is_file() || entry.file_name() != "metadata.json" {
                continue;
            }
            let raw = fs::read_to_string(entry.path())
                .map_err(|e| format!("Read {} failed: {e}", entry.path().display()))?;
            let metadata: StoryMetadata = serde_json::from_str(&raw)
                .map_err(|e| format!("Parse {} failed: {e}", entry.path().display()))?;
            all.push(metadata);
        }
        debug!("collected metadata for {} stories", all.len());
        Ok(all)
    }

    /// Path of a story's downloaded HTML content, per the fixed
    /// `fanfics/<site>/<id>/story.html` convention.
    pub fn story_html_path(&self, metadata: &StoryMetadata) -> PathBuf {
        self.root
            .join("fanfics")
            .join(&metadata.siteabbrev)
            .join(&metadata.story_id)
            .join("story.html")
    }
}
