use crate::config::ShoplistConfig;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use serde::Serialize;

/// A list as shown in the list overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub name: String,
    pub multi_line: bool,
    pub display_name: String,
}

/// Enumerates lists and derives their display metadata.
pub struct Catalog<'a, B: StorageBackend> {
    backend: &'a B,
    multi_line_prefix: String,
}

impl<'a, B: StorageBackend> Catalog<'a, B> {
    pub fn new(backend: &'a B, config: &ShoplistConfig) -> Self {
        Self {
            backend,
            multi_line_prefix: config.multi_line_prefix.clone(),
        }
    }

    /// All list names, sorted lexicographically.
    pub fn list_all(&self) -> Result<Vec<String>> {
        let mut names = self.backend.list_names()?;
        names.sort();
        Ok(names)
    }

    pub fn is_multi_line(&self, list: &str) -> bool {
        is_multi_line(list, &self.multi_line_prefix)
    }

    pub fn display_name(&self, list: &str, multi_line: bool) -> String {
        display_name(list, multi_line, &self.multi_line_prefix)
    }

    pub fn entry(&self, list: &str) -> ListEntry {
        let multi_line = self.is_multi_line(list);
        ListEntry {
            name: list.to_string(),
            multi_line,
            display_name: self.display_name(list, multi_line),
        }
    }

    pub fn entries(&self) -> Result<Vec<ListEntry>> {
        Ok(self
            .list_all()?
            .iter()
            .map(|name| self.entry(name))
            .collect())
    }
}

pub fn is_multi_line(list: &str, prefix: &str) -> bool {
    list.starts_with(prefix)
}

pub fn display_name(list: &str, multi_line: bool, prefix: &str) -> String {
    if multi_line {
        list.strip_prefix(prefix).unwrap_or(list).to_string()
    } else {
        list.to_string()
    }
}
