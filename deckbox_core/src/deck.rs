//! Decks: named, ordered, duplicate-permitting lists of card references.

use crate::{CardId, CardRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// On-disk form of a deck: its name and the ordered ids it holds
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetachedDeck {
    pub name: String,
    pub cards: Vec<CardId>,
}

/// A deck under active management
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    name: String,
    cards: Vec<CardRef>,
}

impl Deck {
    /// Create an empty deck
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reassign the deck's name
    ///
    /// Decks held by a [`DeckRegistry`](crate::DeckRegistry) must be renamed
    /// through the registry so its index stays consistent.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn cards(&self) -> &[CardRef] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Ids of every held item, in deck order
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(CardRef::id)
    }

    /// Number of copies of `id` in the deck
    pub fn count(&self, id: CardId) -> usize {
        self.cards.iter().filter(|c| c.matches(id)).count()
    }

    /// Append a card to the end of the deck
    pub fn add_card(&mut self, card: impl Into<CardRef>) {
        self.cards.push(card.into());
    }

    /// Remove up to `amount` copies of `id`, front first
    ///
    /// Returns how many were removed. Asking for more copies than the deck
    /// holds removes all of them.
    pub fn remove_card(&mut self, id: CardId, amount: usize) -> usize {
        let mut removed = 0;
        self.cards.retain(|card| {
            if removed < amount && card.matches(id) {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Catalog-independent copy of this deck
    pub fn to_detached_form(&self) -> DetachedDeck {
        DetachedDeck {
            name: self.name.clone(),
            cards: self.ids().collect(),
        }
    }
}

impl From<DetachedDeck> for Deck {
    /// Deck holding bare ids, not resolved against any catalog
    fn from(detached: DetachedDeck) -> Self {
        Self {
            name: detached.name,
            cards: detached.cards.into_iter().map(CardRef::Id).collect(),
        }
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Deck {} ({} cards)>", self.name, self.cards.len())
    }
}
