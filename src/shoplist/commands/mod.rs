//! # Command Layer
//!
//! One module per user operation. Commands take the backend and configuration
//! they need, do the work through the store/catalog/attachment services, and
//! return a [`CmdResult`]: structured data for the caller to render plus
//! user-facing [`CmdMessage`]s.
//!
//! Commands never print. Failures that abort the operation are `Err`;
//! failures that are tolerated (event log, attachment cleanup) become
//! warning messages next to the data.

use crate::attachments::{AttachmentRef, Download};
use crate::catalog::ListEntry;
use crate::config::ShoplistConfig;
use crate::model::Item;
use crate::store::ActionReport;
use std::path::PathBuf;

pub mod action;
pub mod attach;
pub mod config;
pub mod fetch;
pub mod init;
pub mod items;
pub mod lists;
pub mod new_list;
pub mod request;

#[derive(Debug, Clone)]
pub struct ShoplistPaths {
    /// Holds `config.json`.
    pub home: PathBuf,
    pub lists_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_lists: Vec<ListEntry>,
    /// The list whose items are in `listed_items`.
    pub list: Option<ListEntry>,
    pub listed_items: Vec<Item>,
    pub reports: Vec<ActionReport>,
    pub attachment: Option<AttachmentRef>,
    pub download: Option<Download>,
    pub config: Option<ShoplistConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_lists(mut self, lists: Vec<ListEntry>) -> Self {
        self.listed_lists = lists;
        self
    }

    pub fn with_items(mut self, list: ListEntry, items: Vec<Item>) -> Self {
        self.list = Some(list);
        self.listed_items = items;
        self
    }

    pub fn with_attachment(mut self, attachment: AttachmentRef) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn with_download(mut self, download: Download) -> Self {
        self.download = Some(download);
        self
    }

    pub fn with_config(mut self, config: ShoplistConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Appends another result's reports and messages.
    pub fn merge(&mut self, other: CmdResult) {
        self.reports.extend(other.reports);
        self.messages.extend(other.messages);
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
