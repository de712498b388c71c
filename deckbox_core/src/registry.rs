//! In-memory registry of active decks, keyed by unique name.
//!
//! The registry performs no I/O. Keeping deck files in step with `delete`
//! and `rename` is up to the caller, after the registry call succeeds.

use crate::{CardId, CardRef, Deck, Error, Result};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct DeckRegistry {
    decks: BTreeMap<String, Deck>,
}

impl DeckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new empty deck
    pub fn create(&mut self, name: &str) -> Result<&mut Deck> {
        if self.decks.contains_key(name) {
            return Err(Error::DuplicateDeckName(name.to_string()));
        }
        tracing::debug!("Created deck '{}'", name);
        Ok(self
            .decks
            .entry(name.to_string())
            .or_insert_with(|| Deck::new(name)))
    }

    /// Register an existing deck (e.g. one loaded from disk) under its own name
    pub fn insert(&mut self, deck: Deck) -> Result<()> {
        if self.decks.contains_key(deck.name()) {
            return Err(Error::DuplicateDeckName(deck.name().to_string()));
        }
        self.decks.insert(deck.name().to_string(), deck);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Deck> {
        self.decks.get(name)
    }

    /// Deck names in sorted order
    pub fn list(&self) -> Vec<String> {
        self.decks.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Unregister a deck and hand it back
    pub fn delete(&mut self, name: &str) -> Result<Deck> {
        let deck = self
            .decks
            .remove(name)
            .ok_or_else(|| Error::DeckNotFound(name.to_string()))?;
        tracing::debug!("Deleted deck '{}'", name);
        Ok(deck)
    }

    pub fn add(&mut self, name: &str, card: impl Into<CardRef>) -> Result<()> {
        self.deck_mut(name)?.add_card(card);
        Ok(())
    }

    /// Remove one copy of `id` from the deck
    pub fn remove(&mut self, name: &str, id: CardId) -> Result<usize> {
        self.remove_amount(name, id, 1)
    }

    /// Remove up to `amount` copies of `id` from the deck
    pub fn remove_amount(&mut self, name: &str, id: CardId, amount: usize) -> Result<usize> {
        Ok(self.deck_mut(name)?.remove_card(id, amount))
    }

    pub fn clear(&mut self, name: &str) -> Result<()> {
        self.deck_mut(name)?.clear();
        Ok(())
    }

    /// Re-key a deck and update its name
    ///
    /// Nothing changes unless both checks pass.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        if !self.decks.contains_key(old) {
            return Err(Error::DeckNotFound(old.to_string()));
        }
        if self.decks.contains_key(new) {
            return Err(Error::DuplicateDeckName(new.to_string()));
        }

        let mut deck = self
            .decks
            .remove(old)
            .ok_or_else(|| Error::DeckNotFound(old.to_string()))?;
        deck.set_name(new);
        self.decks.insert(new.to_string(), deck);
        tracing::debug!("Renamed deck '{}' -> '{}'", old, new);
        Ok(())
    }

    fn deck_mut(&mut self, name: &str) -> Result<&mut Deck> {
        self.decks
            .get_mut(name)
            .ok_or_else(|| Error::DeckNotFound(name.to_string()))
    }
}
