use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::ShoplistConfig;
use crate::error::Result;
use crate::store::backend::StorageBackend;

pub fn run<B: StorageBackend>(backend: &B, config: &ShoplistConfig) -> Result<CmdResult> {
    let entries = Catalog::new(backend, config).entries()?;
    let mut result = CmdResult::default();
    if entries.is_empty() {
        result.add_message(CmdMessage::info(
            "No lists yet. Create one with `shoplist new <list>`.",
        ));
    }
    Ok(result.with_listed_lists(entries))
}
