//! Interactive deck shell.
//!
//! Reads one command per line, applies it to the deck registry and keeps
//! deck files in step with deletes and renames. A failing command prints a
//! message and the loop carries on.

use deckbox_core::{parse_card_id, CardId, CardRef, Catalog, DeckRegistry, DeckStore};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Commands:
  create_deck <name>                 create a new deck (one word, no spaces)
  list_decks                         list all decks
  show_deck <name>                   show the cards in a deck
  delete_deck <name>                 delete a deck and its saved file
  rename_deck <old> <new>            rename a deck and its saved file
  clear_deck <name>                  remove every card from a deck
  search <text>                      search cards by name
  add_card <deck> <id>               add a card to a deck
  remove_card <deck> <id> [amount]   remove copies of a card from a deck
  save_deck <name>                   save a deck to disk
  help                               show this message
  exit                               leave the shell";

/// A parsed shell command
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    CreateDeck(String),
    ListDecks,
    ShowDeck(String),
    DeleteDeck(String),
    RenameDeck { old: String, new: String },
    ClearDeck(String),
    Search(String),
    AddCard { deck: String, id: CardId },
    RemoveCard { deck: String, id: CardId, amount: usize },
    SaveDeck(String),
    Help,
    Exit,
    Empty,
}

/// Why a line could not be turned into a command
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command: {0}. Type help to list commands.")]
    Unknown(String),

    #[error("Deck names cannot contain whitespace: '{0}'")]
    WhitespaceInName(String),

    #[error(transparent)]
    Core(#[from] deckbox_core::Error),
}

/// Parse one input line
///
/// Commands that look up an existing deck take the whole rest of the line
/// as its name, so decks loaded from files with spaces in their names stay
/// reachable. New names (`create_deck`) must be a single word, since
/// `add_card`, `remove_card` and `rename_deck` split on whitespace.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let single = |usage: &'static str| -> Result<String, CommandError> {
        if rest.is_empty() {
            Err(CommandError::Usage(usage))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match name {
        "" => Command::Empty,
        "create_deck" => match args.as_slice() {
            [] => return Err(CommandError::Usage("create_deck <name>")),
            [name] => Command::CreateDeck(name.to_string()),
            _ => return Err(CommandError::WhitespaceInName(rest.to_string())),
        },
        "list_decks" => Command::ListDecks,
        "show_deck" => Command::ShowDeck(single("show_deck <name>")?),
        "delete_deck" => Command::DeleteDeck(single("delete_deck <name>")?),
        "clear_deck" => Command::ClearDeck(single("clear_deck <name>")?),
        "save_deck" => Command::SaveDeck(single("save_deck <name>")?),
        "search" => Command::Search(single("search <text>")?),
        "rename_deck" => match args.as_slice() {
            [old, new] => Command::RenameDeck {
                old: old.to_string(),
                new: new.to_string(),
            },
            _ => return Err(CommandError::Usage("rename_deck <old> <new>")),
        },
        "add_card" => match args.as_slice() {
            [deck, id] => Command::AddCard {
                deck: deck.to_string(),
                id: parse_card_id(id)?,
            },
            _ => return Err(CommandError::Usage("add_card <deck> <id>")),
        },
        "remove_card" => {
            const USAGE: &str = "remove_card <deck> <id> [amount]";
            let (deck, id, amount) = match args.as_slice() {
                [deck, id] => (deck, id, 1),
                [deck, id, amount] => match amount.parse::<usize>() {
                    Ok(amount) if amount > 0 => (deck, id, amount),
                    _ => return Err(CommandError::Usage(USAGE)),
                },
                _ => return Err(CommandError::Usage(USAGE)),
            };
            Command::RemoveCard {
                deck: deck.to_string(),
                id: parse_card_id(id)?,
                amount,
            }
        }
        "help" | "?" => Command::Help,
        "exit" | "quit" => Command::Exit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Whether the loop should keep reading
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Session state: the catalog, the active decks and where they are saved
pub struct Shell<'a> {
    catalog: &'a Catalog,
    store: DeckStore,
    registry: DeckRegistry,
    search_limit: usize,
}

impl<'a> Shell<'a> {
    pub fn new(catalog: &'a Catalog, store: DeckStore, search_limit: usize) -> Self {
        Self {
            catalog,
            store,
            registry: DeckRegistry::new(),
            search_limit,
        }
    }

    pub fn registry(&self) -> &DeckRegistry {
        &self.registry
    }

    /// Load every saved deck into the registry
    ///
    /// Creates the decks directory if needed. Decks that fail to load are
    /// reported and skipped. Returns how many were loaded.
    pub fn autoload<W: Write>(&mut self, out: &mut W) -> io::Result<usize> {
        std::fs::create_dir_all(self.store.dir())?;

        let names = match self.store.list() {
            Ok(names) => names,
            Err(e) => {
                writeln!(out, "[warning] could not list saved decks: {}", e)?;
                return Ok(0);
            }
        };

        let mut loaded = 0;
        for name in names {
            let result = self
                .store
                .load(&name, self.catalog)
                .and_then(|deck| self.registry.insert(deck));
            match result {
                Ok(()) => loaded += 1,
                Err(e) => {
                    tracing::warn!("Failed to load deck '{}': {}", name, e);
                    writeln!(out, "[warning] failed to load {}.json: {}", name, e)?;
                }
            }
        }

        writeln!(out, "{} deck(s) loaded.", loaded)?;
        Ok(loaded)
    }

    /// Run the read-eval loop until `exit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "Deckbox - type help to list commands")?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line?;

            let flow = match parse_command(&line) {
                Ok(command) => self.execute(command, out)?,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        tracing::debug!("Executing {:?}", command);

        match command {
            Command::Empty => {}
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Exit => {
                writeln!(out, "Bye.")?;
                return Ok(Flow::Exit);
            }

            Command::CreateDeck(name) => match self.registry.create(&name) {
                Ok(_) => writeln!(out, "Deck '{}' created.", name)?,
                Err(e) => writeln!(out, "{}", e)?,
            },

            Command::ListDecks => {
                let names = self.registry.list();
                if names.is_empty() {
                    writeln!(out, "No decks available.")?;
                }
                for name in names {
                    writeln!(out, "• {}", name)?;
                }
            }

            Command::ShowDeck(name) => self.show_deck(&name, out)?,

            Command::DeleteDeck(name) => {
                if let Err(e) = self.registry.delete(&name) {
                    writeln!(out, "{}", e)?;
                    return Ok(Flow::Continue);
                }
                match self.store.remove(&name) {
                    Ok(true) => writeln!(out, "Deck '{}' deleted and file removed.", name)?,
                    Ok(false) => writeln!(out, "Deck '{}' deleted (no saved file).", name)?,
                    Err(e) => writeln!(out, "Deck '{}' deleted, but its file was kept: {}", name, e)?,
                }
            }

            Command::RenameDeck { old, new } => {
                if let Err(e) = self.registry.rename(&old, &new) {
                    writeln!(out, "{}", e)?;
                    return Ok(Flow::Continue);
                }
                if let Err(e) = self.store.rename(&old, &new) {
                    writeln!(out, "[warning] saved file not renamed: {}", e)?;
                }
                writeln!(out, "Deck renamed from '{}' to '{}'.", old, new)?;
            }

            Command::ClearDeck(name) => match self.registry.clear(&name) {
                Ok(()) => writeln!(out, "Deck '{}' cleared (all cards removed).", name)?,
                Err(e) => writeln!(out, "{}", e)?,
            },

            Command::Search(text) => {
                let results = self.catalog.search(&text);
                if results.is_empty() {
                    writeln!(out, "No cards found.")?;
                }
                for card in results.iter().take(self.search_limit) {
                    writeln!(out, "{}: {}", card.id, card.name.as_deref().unwrap_or_default())?;
                }
                if results.len() > self.search_limit {
                    writeln!(out, "... and {} more", results.len() - self.search_limit)?;
                }
            }

            Command::AddCard { deck, id } => {
                let Some(card) = self.catalog.get(id) else {
                    writeln!(out, "Card {} not found.", id)?;
                    return Ok(Flow::Continue);
                };
                match self.registry.add(&deck, card) {
                    Ok(()) => writeln!(out, "Card {} added to deck '{}'.", id, deck)?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }

            Command::RemoveCard { deck, id, amount } => {
                match self.registry.remove_amount(&deck, id, amount) {
                    Ok(0) => writeln!(out, "Card {} is not in deck '{}'.", id, deck)?,
                    Ok(removed) => writeln!(
                        out,
                        "Removed {} cop{} of card {} from deck '{}'.",
                        removed,
                        if removed == 1 { "y" } else { "ies" },
                        id,
                        deck
                    )?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }

            Command::SaveDeck(name) => {
                let Some(deck) = self.registry.get(&name) else {
                    writeln!(out, "{}", deckbox_core::Error::DeckNotFound(name))?;
                    return Ok(Flow::Continue);
                };
                match self.store.save(deck) {
                    Ok(_) => writeln!(out, "Deck '{}' saved.", name)?,
                    Err(e) => writeln!(out, "Deck '{}' not saved: {}", name, e)?,
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn show_deck<W: Write>(&self, name: &str, out: &mut W) -> io::Result<()> {
        let Some(deck) = self.registry.get(name) else {
            return writeln!(out, "{}", deckbox_core::Error::DeckNotFound(name.to_string()));
        };

        writeln!(out, "Deck: {}", deck.name())?;
        if deck.is_empty() {
            return writeln!(out, "(empty)");
        }
        for card in deck.cards() {
            let label = match card {
                CardRef::Resolved(card) => card.name.as_deref().unwrap_or("<unnamed>"),
                CardRef::Id(_) => "<unresolved>",
            };
            writeln!(out, "{} - {}", card.id(), label)?;
        }
        Ok(())
    }
}
