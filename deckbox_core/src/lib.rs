#![forbid(unsafe_code)]

//! Core domain model for the Deckbox card collection manager.
//!
//! This crate provides:
//! - Card records and the catalog they are loaded into
//! - Decks and the in-memory registry of active decks
//! - Deck file persistence
//! - Configuration and logging setup

pub mod error;
pub mod card;
pub mod catalog;
pub mod deck;
pub mod storage;
pub mod registry;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use card::{parse_card_id, Card, CardId, CardRef};
pub use catalog::{CardLookup, Catalog};
pub use deck::{Deck, DetachedDeck};
pub use storage::DeckStore;
pub use registry::DeckRegistry;
pub use config::Config;
