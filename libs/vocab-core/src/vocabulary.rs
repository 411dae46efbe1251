//! In-memory vocabulary store with dictionary and statistics queries.

use crate::parser::parse;
use crate::types::{ParseMode, VocabularyItem, DEFAULT_TAG};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// File preferred when the vocabulary source is a directory.
pub const CURATED_FILE_NAME: &str = "dados_concluidos.txt";

/// Item counts for dashboards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyStats {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_level: BTreeMap<String, usize>,
    pub dominant_level: Option<String>,
}

/// Set of uniquely-keyed vocabulary items.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    items: Vec<VocabularyItem>,
}

impl Vocabulary {
    /// Build from already-parsed items, keeping the first item per term.
    pub fn from_items(items: Vec<VocabularyItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.term.clone()))
            .collect();
        Self { items }
    }

    /// Load from a file or a directory of `.txt` files.
    ///
    /// Never fails: missing or unreadable sources produce fewer items.
    pub fn load(path: &Path, mode: ParseMode) -> Self {
        let files = source_files(path);
        if files.is_empty() {
            tracing::warn!(path = %path.display(), "no vocabulary files found");
        }

        let mut items = Vec::new();
        for file in files {
            match fs::read_to_string(&file) {
                Ok(content) => {
                    let parsed = parse(&content, mode);
                    tracing::debug!(file = %file.display(), count = parsed.len(), "parsed vocabulary file");
                    items.extend(parsed);
                }
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "skipping unreadable vocabulary file");
                }
            }
        }

        Self::from_items(items)
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, term: &str) -> Option<&VocabularyItem> {
        self.items.iter().find(|item| item.term == term)
    }

    /// Items that take part in spaced repetition.
    pub fn reviewable(&self) -> Vec<&VocabularyItem> {
        self.items.iter().filter(|item| !item.is_mission()).collect()
    }

    /// Items in a reserved mission category.
    pub fn missions(&self) -> Vec<&VocabularyItem> {
        self.items.iter().filter(|item| item.is_mission()).collect()
    }

    /// Case-insensitive substring search on term and translation.
    pub fn search(&self, query: &str) -> Vec<&VocabularyItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|item| {
                item.term.to_lowercase().contains(&needle)
                    || item.translation.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Items matching an optional category and level.
    pub fn filter(&self, category: Option<&str>, level: Option<&str>) -> Vec<&VocabularyItem> {
        self.items
            .iter()
            .filter(|item| matches_tag(&item.category, category) && matches_tag(&item.level, level))
            .collect()
    }

    /// Distinct categories, excluding the default tag.
    pub fn categories(&self) -> Vec<String> {
        distinct_tags(self.items.iter().map(|item| item.category.as_str()))
    }

    /// Distinct levels, excluding the default tag.
    pub fn levels(&self) -> Vec<String> {
        distinct_tags(self.items.iter().map(|item| item.level.as_str()))
    }

    pub fn stats(&self) -> VocabularyStats {
        let mut by_category = BTreeMap::new();
        let mut by_level = BTreeMap::new();
        for item in &self.items {
            *by_category.entry(item.category.clone()).or_insert(0) += 1;
            *by_level.entry(item.level.clone()).or_insert(0) += 1;
        }

        // BTreeMap iterates in key order, so the first maximum wins ties.
        let dominant_level = by_level
            .iter()
            .fold(None::<(&String, usize)>, |best, (level, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((level, count)),
            })
            .map(|(level, _)| level.clone());

        VocabularyStats {
            total: self.items.len(),
            by_category,
            by_level,
            dominant_level,
        }
    }
}

fn matches_tag(value: &str, wanted: Option<&str>) -> bool {
    wanted.map_or(true, |w| value == w)
}

fn distinct_tags<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty() && *v != DEFAULT_TAG)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Resolve the list of files to read for a source path.
fn source_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    if !path.is_dir() {
        return Vec::new();
    }

    let curated = path.join(CURATED_FILE_NAME);
    if curated.is_file() {
        return vec![curated];
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read vocabulary directory");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .filter(|p| {
            p.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with('.'))
        })
        .collect();
    files.sort();
    files
}
