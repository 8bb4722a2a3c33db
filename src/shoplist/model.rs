//! Core data types: lists, items, states and the action vocabulary.
//!
//! A list is an ordered mapping from item name to [`ItemState`]. Order is the
//! order items were first seen (file order on load), and re-setting an item keeps
//! its position. Sorting only happens at view time, see [`ItemOrder`].

use crate::error::{Result, ShoplistError};
use serde::Serialize;
use std::fmt;

/// State of a single item. The discriminant is the on-disk state code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ItemState {
    Unchecked = 0,
    Checked = 1,
    Hidden = 2,
}

impl ItemState {
    pub fn code(self) -> char {
        match self {
            ItemState::Unchecked => '0',
            ItemState::Checked => '1',
            ItemState::Hidden => '2',
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(ItemState::Unchecked),
            "1" => Some(ItemState::Checked),
            "2" => Some(ItemState::Hidden),
            _ => None,
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An item action as sent over the wire (`c`, `u`, `h`, `d`).
///
/// Unknown codes are kept as [`Action::Other`]: they change nothing but are
/// still persisted and logged like any other action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create,
    Uncheck,
    Hide,
    Delete,
    Other(String),
}

impl Action {
    pub fn from_code(code: &str) -> Self {
        match code {
            "c" => Action::Create,
            "u" => Action::Uncheck,
            "h" => Action::Hide,
            "d" => Action::Delete,
            other => Action::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Action::Create => "c",
            Action::Uncheck => "u",
            Action::Hide => "h",
            Action::Delete => "d",
            Action::Other(code) => code,
        }
    }

    /// The state an item ends up in, for actions that set one.
    pub fn target_state(&self) -> Option<ItemState> {
        match self {
            Action::Create => Some(ItemState::Checked),
            Action::Uncheck => Some(ItemState::Unchecked),
            Action::Hide => Some(ItemState::Hidden),
            Action::Delete | Action::Other(_) => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A list name with path separators and dots stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListName(String);

impl ListName {
    /// Sanitizes `raw`. Fails when nothing is left of it.
    pub fn new(raw: &str) -> Result<Self> {
        let cleaned = sanitize_list_name(raw);
        if cleaned.is_empty() {
            return Err(ShoplistError::UnsafeIdentifier(raw.to_string()));
        }
        Ok(Self(cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ListName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn sanitize_list_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '/' | '\\' | '.'))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub name: String,
    pub state: ItemState,
}

impl Item {
    pub fn new(name: impl Into<String>, state: ItemState) -> Self {
        Self {
            name: name.into(),
            state,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    items: Vec<Item>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn get(&self, name: &str) -> Option<ItemState> {
        self.items
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.state)
    }

    /// Inserts or updates an item. Existing items keep their position.
    pub fn set(&mut self, name: &str, state: ItemState) {
        match self.items.iter_mut().find(|item| item.name == name) {
            Some(item) => item.state = state,
            None => self.items.push(Item::new(name, state)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<ItemState> {
        let pos = self.items.iter().position(|item| item.name == name)?;
        Some(self.items.remove(pos).state)
    }

    /// Applies `action` to `name` and returns the item's resulting state.
    pub fn apply(&mut self, action: &Action, name: &str) -> Option<ItemState> {
        match action {
            Action::Delete => {
                self.remove(name);
                None
            }
            Action::Other(_) => self.get(name),
            _ => {
                let state = action.target_state()?;
                self.set(name, state);
                Some(state)
            }
        }
    }

    pub fn sorted(&self, order: ItemOrder) -> Vec<Item> {
        let mut items = self.items.clone();
        sort_items(&mut items, order);
        items
    }
}

impl FromIterator<(String, ItemState)> for ShoppingList {
    fn from_iter<T: IntoIterator<Item = (String, ItemState)>>(iter: T) -> Self {
        let mut list = ShoppingList::new();
        for (name, state) in iter {
            list.set(&name, state);
        }
        list
    }
}

impl<'a> IntoIterator for &'a ShoppingList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemOrder {
    /// As stored.
    #[default]
    File,
    Name,
    /// State code descending. Stable, so ties keep their previous order.
    State,
}

pub fn sort_items(items: &mut [Item], order: ItemOrder) {
    match order {
        ItemOrder::File => {}
        ItemOrder::Name => items.sort_by(|a, b| a.name.cmp(&b.name)),
        ItemOrder::State => items.sort_by(|a, b| b.state.cmp(&a.state)),
    }
}

/// An `<action><sep><item>` request body, as posted by a browser client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub action: Action,
    pub item: String,
}

impl ItemRequest {
    /// Splits on the first separator. The item name is kept verbatim, so a
    /// client that escaped separators (`&#124;`) stores the escaped form.
    pub fn parse(body: &str, separator: char) -> Result<Self> {
        let (action, item) = body
            .split_once(separator)
            .ok_or_else(|| ShoplistError::MalformedRequest(body.to_string()))?;
        Ok(Self {
            action: Action::from_code(action),
            item: item.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(entries: &[(&str, ItemState)]) -> ShoppingList {
        entries
            .iter()
            .map(|(name, state)| (name.to_string(), *state))
            .collect()
    }

    #[test]
    fn state_codes() {
        assert_eq!(ItemState::Unchecked.code(), '0');
        assert_eq!(ItemState::Hidden.to_string(), "2");
        assert_eq!(ItemState::from_code("1"), Some(ItemState::Checked));
        assert_eq!(ItemState::from_code("3"), None);
        assert_eq!(ItemState::from_code(""), None);
    }

    #[test]
    fn action_codes() {
        assert_eq!(Action::from_code("c"), Action::Create);
        assert_eq!(Action::from_code("d").code(), "d");
        assert_eq!(Action::from_code("x"), Action::Other("x".into()));
        assert_eq!(Action::Other("zz".into()).to_string(), "zz");
    }

    #[test]
    fn list_name_strips_traversal_characters() {
        let name = ListName::new("../../etc/pass.wd").unwrap();
        assert_eq!(name.as_str(), "etcpasswd");
        let name = ListName::new("groceries").unwrap();
        assert_eq!(name.as_str(), "groceries");
        assert!(matches!(
            ListName::new("./.."),
            Err(ShoplistError::UnsafeIdentifier(_))
        ));
    }

    #[test]
    fn set_keeps_position_of_existing_items() {
        let mut list = list_of(&[("milk", ItemState::Unchecked), ("eggs", ItemState::Unchecked)]);
        list.set("milk", ItemState::Checked);
        let names: Vec<_> = list.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["milk", "eggs"]);
        assert_eq!(list.get("milk"), Some(ItemState::Checked));
    }

    #[test]
    fn action_sequence_transitions() {
        let mut list = list_of(&[("X", ItemState::Unchecked)]);
        assert_eq!(list.apply(&Action::Create, "X"), Some(ItemState::Checked));
        assert_eq!(list.apply(&Action::Hide, "X"), Some(ItemState::Hidden));
        assert_eq!(list.apply(&Action::Delete, "X"), None);
        assert_eq!(list.get("X"), None);

        // A later action recreates the item fresh.
        assert_eq!(list.apply(&Action::Uncheck, "X"), Some(ItemState::Unchecked));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn delete_twice_is_same_as_once() {
        let mut once = list_of(&[("a", ItemState::Checked), ("b", ItemState::Hidden)]);
        once.apply(&Action::Delete, "a");
        let mut twice = once.clone();
        twice.apply(&Action::Delete, "a");
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_action_changes_nothing() {
        let mut list = list_of(&[("a", ItemState::Hidden)]);
        let before = list.clone();
        assert_eq!(
            list.apply(&Action::Other("z".into()), "a"),
            Some(ItemState::Hidden)
        );
        assert_eq!(list.apply(&Action::Other("z".into()), "missing"), None);
        assert_eq!(list, before);
    }

    #[test]
    fn sort_by_state_descending() {
        let list = list_of(&[
            ("A", ItemState::Checked),
            ("B", ItemState::Hidden),
            ("C", ItemState::Unchecked),
        ]);
        let names: Vec<_> = list
            .sorted(ItemOrder::State)
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn sort_by_state_is_stable() {
        let list = list_of(&[
            ("z", ItemState::Checked),
            ("a", ItemState::Unchecked),
            ("m", ItemState::Checked),
        ]);
        let names: Vec<_> = list
            .sorted(ItemOrder::State)
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["z", "m", "a"]);
    }

    #[test]
    fn sort_by_name() {
        let list = list_of(&[("pears", ItemState::Checked), ("apples", ItemState::Hidden)]);
        let names: Vec<_> = list
            .sorted(ItemOrder::Name)
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["apples", "pears"]);
    }

    #[test]
    fn parses_item_request() {
        let req = ItemRequest::parse("c|milk", '|').unwrap();
        assert_eq!(req.action, Action::Create);
        assert_eq!(req.item, "milk");

        let req = ItemRequest::parse("h|a &#124; b", '|').unwrap();
        assert_eq!(req.action, Action::Hide);
        assert_eq!(req.item, "a &#124; b");

        let req = ItemRequest::parse("d|x|y", '|').unwrap();
        assert_eq!(req.item, "x|y");

        assert!(matches!(
            ItemRequest::parse("nothing", '|'),
            Err(ShoplistError::MalformedRequest(_))
        ));
    }
}
