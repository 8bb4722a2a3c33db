//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for all
//! shoplist operations, whatever the UI.
//!
//! The API:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs** (action codes, item lists)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, prints nothing and formats nothing.
//!
//! `ShoplistApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `ShoplistApi<FsBackend>`
//! - Testing: `ShoplistApi<MemBackend>`

use crate::commands;
use crate::config::ShoplistConfig;
use crate::error::Result;
use crate::model::Action;
use crate::store::backend::StorageBackend;

pub struct ShoplistApi<B: StorageBackend> {
    backend: B,
    config: ShoplistConfig,
    paths: commands::ShoplistPaths,
}

impl<B: StorageBackend> ShoplistApi<B> {
    pub fn new(backend: B, config: ShoplistConfig, paths: commands::ShoplistPaths) -> Self {
        Self {
            backend,
            config,
            paths,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ShoplistConfig {
        &self.config
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths)
    }

    pub fn new_list(&self, list: &str) -> Result<commands::CmdResult> {
        commands::new_list::run(&self.backend, list)
    }

    pub fn get_lists(&self) -> Result<commands::CmdResult> {
        commands::lists::run(&self.backend, &self.config)
    }

    pub fn view_items(&self, list: &str, by_state: bool) -> Result<commands::CmdResult> {
        commands::items::run(&self.backend, &self.config, list, by_state)
    }

    pub fn check_items<I: AsRef<str>>(&self, list: &str, items: &[I]) -> Result<commands::CmdResult> {
        self.apply(list, items, Action::Create)
    }

    pub fn uncheck_items<I: AsRef<str>>(&self, list: &str, items: &[I]) -> Result<commands::CmdResult> {
        self.apply(list, items, Action::Uncheck)
    }

    pub fn hide_items<I: AsRef<str>>(&self, list: &str, items: &[I]) -> Result<commands::CmdResult> {
        self.apply(list, items, Action::Hide)
    }

    pub fn delete_items<I: AsRef<str>>(&self, list: &str, items: &[I]) -> Result<commands::CmdResult> {
        self.apply(list, items, Action::Delete)
    }

    /// Applies a raw `<action><sep><item>` request body.
    pub fn apply_request(&self, list: &str, body: &str) -> Result<commands::CmdResult> {
        commands::request::run(&self.backend, &self.config, list, body)
    }

    pub fn attach(&self, list: &str, filename: &str, bytes: &[u8]) -> Result<commands::CmdResult> {
        commands::attach::run(&self.backend, &self.config, list, filename, bytes)
    }

    pub fn fetch(
        &self,
        list: &str,
        file_id: &str,
        requested_name: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::fetch::run(&self.backend, &self.config, list, file_id, requested_name)
    }

    /// Shows or changes `config.json`. A successful change also applies to this
    /// API instance.
    pub fn config_cmd(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let is_set = matches!(action, ConfigAction::Set(..));
        let result = commands::config::run(&self.paths, action)?;
        if is_set {
            if let Some(config) = &result.config {
                self.config = config.clone();
            }
        }
        Ok(result)
    }

    fn apply<I: AsRef<str>>(&self, list: &str, items: &[I], action: Action) -> Result<commands::CmdResult> {
        let items: Vec<String> = items.iter().map(|i| i.as_ref().to_string()).collect();
        commands::action::run(&self.backend, &self.config, list, &items, &action)
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, ShoplistPaths};
