//! Deck persistence: one JSON file per deck.
//!
//! A deck file holds the detached form `{"name": ..., "cards": [ids]}`.
//! Loading resolves ids against a [`CardLookup`] and silently drops ids the
//! catalog no longer knows.

use crate::{CardLookup, Deck, DetachedDeck, Error, Result};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Extension of deck files
pub const DECK_FILE_EXTENSION: &str = "json";

/// Directory of saved decks
#[derive(Clone, Debug)]
pub struct DeckStore {
    dir: PathBuf,
}

impl DeckStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing the deck called `name`
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_deck_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, DECK_FILE_EXTENSION)))
    }

    /// Write the deck's detached form, replacing any previous file
    pub fn save(&self, deck: &Deck) -> Result<PathBuf> {
        let path = self.write_detached(&deck.to_detached_form())?;
        tracing::debug!("Saved deck '{}' ({} cards) to {:?}", deck.name(), deck.len(), path);
        Ok(path)
    }

    /// Write a detached deck to the file keyed by its name
    ///
    /// The file is written to a temp file in the same directory, synced,
    /// then renamed over the target.
    pub fn write_detached(&self, detached: &DetachedDeck) -> Result<PathBuf> {
        let path = self.path_for(&detached.name)?;
        std::fs::create_dir_all(&self.dir)?;

        let temp = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, detached)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;

        // Temp files are created 0600; deck files are ordinary user data.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))?;
        }

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;
        Ok(path)
    }

    /// Read the file keyed by `name` and resolve its ids against `catalog`
    ///
    /// The returned deck carries the name stored inside the file.
    pub fn load(&self, name: &str, catalog: &impl CardLookup) -> Result<Deck> {
        let detached = self.read_detached(name)?;

        let mut deck = Deck::new(detached.name);
        let mut dropped = 0usize;
        for id in detached.cards {
            match catalog.get(id) {
                Some(card) => deck.add_card(card),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::debug!(
                "Deck '{}': skipped {} card id(s) missing from the catalog",
                deck.name(),
                dropped
            );
        }
        Ok(deck)
    }

    /// Read the file keyed by `name` without resolving anything
    pub fn read_detached(&self, name: &str) -> Result<DetachedDeck> {
        let path = self.path_for(name)?;
        let contents = match std::fs::read(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::DeckFileNotFound(path));
            }
            Err(e) => return Err(Error::Io(e)),
        };

        serde_json::from_slice(&contents).map_err(|source| Error::DeckFileCorrupt { path, source })
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|path| path.is_file())
    }

    /// Delete the file for `name`, returning whether one existed
    pub fn remove(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Removed deck file {:?}", path);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Move the saved deck `old` to `new`, returning whether a file existed
    ///
    /// The name stored inside the file is updated too, so the deck comes
    /// back under its new name on the next load. Saved cards are kept as-is.
    pub fn rename(&self, old: &str, new: &str) -> Result<bool> {
        let old_path = self.path_for(old)?;
        self.path_for(new)?;
        if !old_path.is_file() {
            return Ok(false);
        }

        let mut detached = self.read_detached(old)?;
        detached.name = new.to_string();
        let new_path = self.write_detached(&detached)?;
        std::fs::remove_file(&old_path)?;

        tracing::debug!("Renamed deck file {:?} -> {:?}", old_path, new_path);
        Ok(true)
    }

    /// Names of the decks stored in the directory, sorted
    ///
    /// A missing directory holds no decks.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().is_some_and(|ext| ext == DECK_FILE_EXTENSION)
            })
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

/// Reject names that would not map to exactly one file inside the store
fn validate_deck_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\']);
    if invalid {
        return Err(Error::InvalidDeckName(name.to_string()));
    }
    Ok(())
}
