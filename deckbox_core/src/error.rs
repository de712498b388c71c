//! Error types for the deckbox_core library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for deckbox_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The catalog directory does not exist
    #[error("Catalog directory not found: {}", .0.display())]
    CatalogDirectoryNotFound(PathBuf),

    /// A deck with this name is already registered
    #[error("A deck named '{0}' already exists")]
    DuplicateDeckName(String),

    /// No deck with this name is registered
    #[error("Deck '{0}' not found")]
    DeckNotFound(String),

    /// No deck file exists for this name
    #[error("Deck file not found: {}", .0.display())]
    DeckFileNotFound(PathBuf),

    /// Deck file exists but does not hold `{name, cards}`
    #[error("Deck file {} is corrupt: {source}", .path.display())]
    DeckFileCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Text supplied where an integer card id is required
    #[error("Invalid card id: '{0}'")]
    InvalidCardId(String),

    /// Deck name cannot be mapped to a single deck file
    #[error("Invalid deck name: '{0}'")]
    InvalidDeckName(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
