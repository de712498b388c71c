//! Card records and deck item references.
//!
//! A [`Card`] is built once while the catalog loads and is shared behind an
//! [`Arc`] by every deck that resolves it. A [`CardRef`] is what a deck holds:
//! either a bare id (detached form) or a resolved card.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

/// Integer identifier of a card, unique within a catalog
pub type CardId = i64;

/// A single catalog record
///
/// Only `id` is required. Numeric stats keep `Some(0)` distinct from absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    #[serde(rename = "type", default)]
    pub card_type: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "localizedAttribute", default)]
    pub attribute: Option<String>,

    #[serde(rename = "effectText", default)]
    pub effect: Option<String>,

    #[serde(default)]
    pub level: Option<i64>,

    #[serde(default)]
    pub atk: Option<i64>,

    #[serde(default)]
    pub def: Option<i64>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Card {
    /// Create a card with only an id and a name
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::bare(id)
        }
    }

    /// Create a card carrying nothing but its id
    pub fn bare(id: CardId) -> Self {
        Self {
            id,
            card_type: None,
            name: None,
            attribute: None,
            effect: None,
            level: None,
            atk: None,
            def: None,
            properties: Vec::new(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("<unnamed>");
        write!(f, "{} (ID: {})", name, self.id)
    }
}

/// Parse user-supplied text into a card id
pub fn parse_card_id(text: &str) -> Result<CardId> {
    let trimmed = text.trim();
    trimmed
        .parse::<CardId>()
        .map_err(|_| Error::InvalidCardId(trimmed.to_string()))
}

/// An item held by a deck
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardRef {
    /// Bare identifier, not looked up against any catalog
    Id(CardId),
    /// Card resolved from a catalog
    Resolved(Arc<Card>),
}

impl CardRef {
    /// Identifier of the referenced card, whichever form it is in
    pub fn id(&self) -> CardId {
        match self {
            CardRef::Id(id) => *id,
            CardRef::Resolved(card) => card.id,
        }
    }

    /// Whether this item refers to `id`
    pub fn matches(&self, id: CardId) -> bool {
        self.id() == id
    }

    /// The resolved card, if this item has one
    pub fn card(&self) -> Option<&Card> {
        match self {
            CardRef::Id(_) => None,
            CardRef::Resolved(card) => Some(card),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, CardRef::Resolved(_))
    }
}

impl From<CardId> for CardRef {
    fn from(id: CardId) -> Self {
        CardRef::Id(id)
    }
}

impl From<Arc<Card>> for CardRef {
    fn from(card: Arc<Card>) -> Self {
        CardRef::Resolved(card)
    }
}

impl From<Card> for CardRef {
    fn from(card: Card) -> Self {
        CardRef::Resolved(Arc::new(card))
    }
}

impl fmt::Display for CardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardRef::Id(id) => write!(f, "(ID: {})", id),
            CardRef::Resolved(card) => write!(f, "{}", card),
        }
    }
}
