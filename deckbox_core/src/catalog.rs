//! Card catalog loaded from a directory of JSON files.
//!
//! Each `*.json` file holds either a single card record or an array of card
//! records. Files are processed in lexicographic file-name order, so when two
//! files define the same id the one whose name sorts last wins.

use crate::{Card, CardId, Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extension of catalog files
pub const CATALOG_FILE_EXTENSION: &str = "json";

/// Anything that can resolve a card id to a shared card
pub trait CardLookup {
    fn get(&self, id: CardId) -> Option<Arc<Card>>;
}

/// Read-only card index keyed by id
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: BTreeMap<CardId, Arc<Card>>,
}

impl Catalog {
    /// Build a catalog from already constructed cards
    ///
    /// Later cards replace earlier ones with the same id.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut catalog = Self::default();
        for card in cards {
            catalog.insert(card);
        }
        catalog
    }

    /// Load every catalog file found directly inside `dir`
    ///
    /// Fails only when `dir` is missing. Unreadable files and records without
    /// a valid `id` are skipped with a warning.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::CatalogDirectoryNotFound(dir.to_path_buf()));
        }

        let files = catalog_files(dir)?;
        let mut catalog = Self::default();
        let mut skipped_files = 0usize;

        for path in &files {
            match catalog.load_file(path) {
                Ok(count) => tracing::debug!("Loaded {} card(s) from {:?}", count, path),
                Err(e) => {
                    skipped_files += 1;
                    tracing::warn!("Skipping catalog file {:?}: {}", path, e);
                }
            }
        }

        tracing::info!(
            "Loaded {} cards from {} catalog file(s) in {:?} ({} skipped)",
            catalog.len(),
            files.len(),
            dir,
            skipped_files
        );
        Ok(catalog)
    }

    /// Parse one file and merge its records, returning how many were inserted
    fn load_file(&mut self, path: &Path) -> Result<usize> {
        let contents = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&contents)?;

        let records = match value {
            Value::Object(_) => vec![value],
            Value::Array(items) => items,
            other => {
                return Err(Error::Json(serde::de::Error::custom(format!(
                    "expected a card record or a list of records, found {}",
                    json_kind(&other)
                ))))
            }
        };

        let mut inserted = 0;
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Card>(record) {
                Ok(card) => {
                    self.insert(card);
                    inserted += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping record {} in {:?}: {}", index, path, e);
                }
            }
        }
        Ok(inserted)
    }

    fn insert(&mut self, card: Card) {
        let id = card.id;
        if self.cards.insert(id, Arc::new(card)).is_some() {
            tracing::debug!("Card {} redefined, keeping the later record", id);
        }
    }

    /// Look up a card by id
    pub fn get(&self, id: CardId) -> Option<Arc<Card>> {
        self.cards.get(&id).cloned()
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards whose name contains `text`, ignoring case
    ///
    /// Cards without a name never match, not even the empty query.
    pub fn search(&self, text: &str) -> Vec<Arc<Card>> {
        let needle = text.to_lowercase();
        self.cards
            .values()
            .filter(|card| {
                card.name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }
}

impl CardLookup for Catalog {
    fn get(&self, id: CardId) -> Option<Arc<Card>> {
        Catalog::get(self, id)
    }
}

/// Catalog files directly inside `dir`, sorted by file name
fn catalog_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == CATALOG_FILE_EXTENSION)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
