//! # Storage Layer
//!
//! [`ItemStore`] translates between a list's flat-file representation and an
//! in-memory [`ShoppingList`], and applies item actions as read-modify-write
//! cycles.
//!
//! Raw I/O goes through the [`backend::StorageBackend`] trait:
//!
//! - [`fs_backend::FsBackend`]: production storage in the lists directory
//! - [`mem_backend::MemBackend`]: in-memory storage for testing
//!
//! ## List Format
//!
//! One item per line, `<name><separator><state code>`, lines joined with CRLF
//! and no trailing terminator:
//!
//! ```text
//! milk|1\r\n
//! eggs|0\r\n
//! bread|2
//! ```
//!
//! Lines split on the first separator. Item names may therefore never contain
//! the separator (or a line break); writes reject such names instead of
//! escaping them.
//!
//! ## Concurrency
//!
//! Saves replace the whole file. [`ItemStore::apply_action`] holds the list's
//! lock for the full load → apply → save cycle, so concurrent actions on one
//! list are serialized instead of losing updates.

use crate::config::ShoplistConfig;
use crate::error::{Result, ShoplistError};
use crate::events::EventLogger;
use crate::model::{Action, ItemState, ListName, ShoppingList};
use tracing::{debug, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

use backend::StorageBackend;

/// Outcome of [`ItemStore::apply_action`].
#[derive(Debug)]
pub struct ActionReport {
    pub list: ListName,
    pub item: String,
    pub action: Action,
    /// State after the action, `None` if the item does not exist.
    pub state: Option<ItemState>,
    /// Set when the list was saved but the event could not be logged.
    pub event_log_error: Option<ShoplistError>,
}

pub struct ItemStore<'a, B: StorageBackend> {
    backend: &'a B,
    separator: char,
}

impl<'a, B: StorageBackend> ItemStore<'a, B> {
    pub fn new(backend: &'a B, config: &ShoplistConfig) -> Self {
        Self {
            backend,
            separator: config.separator,
        }
    }

    pub fn load(&self, list: &ListName) -> Result<ShoppingList> {
        let content = self
            .backend
            .read_list(list)?
            .ok_or_else(|| ShoplistError::ListNotFound(list.to_string()))?;
        let items = decode(list.as_str(), &content, self.separator)?;
        debug!(list = %list, items = items.len(), "loaded list");
        Ok(items)
    }

    /// Overwrites an existing list. Never creates one.
    pub fn save(&self, list: &ListName, items: &ShoppingList) -> Result<()> {
        if !self.backend.list_exists(list) {
            return Err(ShoplistError::ListNotFound(list.to_string()));
        }
        let content = encode(items, self.separator)?;
        self.backend.write_list(list, &content)?;
        debug!(list = %list, items = items.len(), "saved list");
        Ok(())
    }

    pub fn apply_action(&self, list: &ListName, item: &str, action: &Action) -> Result<ActionReport> {
        validate_item_name(item, self.separator)?;
        validate_action_code(action)?;
        if !self.backend.list_exists(list) {
            return Err(ShoplistError::ListNotFound(list.to_string()));
        }

        let state = {
            let _lock = self.backend.lock_list(list)?;
            let mut items = self.load(list)?;
            let state = items.apply(action, item);
            self.save(list, &items)?;
            state
        };

        let event_log_error = EventLogger::new(self.backend)
            .log(list, item, action)
            .err();
        if let Some(e) = &event_log_error {
            warn!(list = %list, item, action = %action, error = %e, "event not logged");
        }

        Ok(ActionReport {
            list: list.clone(),
            item: item.to_string(),
            action: action.clone(),
            state,
            event_log_error,
        })
    }
}

pub fn validate_item_name(name: &str, separator: char) -> Result<()> {
    if name.contains(separator) || name.contains(['\r', '\n']) {
        return Err(ShoplistError::InvalidItemName(name.to_string()));
    }
    Ok(())
}

/// Action codes end up verbatim in the comma separated event log.
pub fn validate_action_code(action: &Action) -> Result<()> {
    let code = action.code();
    if code.contains([',', '\r', '\n']) {
        return Err(ShoplistError::MalformedRequest(code.to_string()));
    }
    Ok(())
}

pub fn decode(list: &str, content: &str, separator: char) -> Result<ShoppingList> {
    let mut items = ShoppingList::new();
    for (idx, raw) in content.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() {
            continue;
        }
        let malformed = || ShoplistError::MalformedLine {
            list: list.to_string(),
            line: idx + 1,
            content: line.to_string(),
        };
        let (name, code) = line.split_once(separator).ok_or_else(malformed)?;
        let state = ItemState::from_code(code).ok_or_else(malformed)?;
        items.set(name, state);
    }
    Ok(items)
}

pub fn encode(items: &ShoppingList, separator: char) -> Result<String> {
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        validate_item_name(&item.name, separator)?;
        lines.push(format!("{}{}{}", item.name, separator, item.state.code()));
    }
    Ok(lines.join("\r\n"))
}
