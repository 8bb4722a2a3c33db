use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ListName;
use crate::store::backend::StorageBackend;

/// Provisions an empty list. An existing list is left untouched.
pub fn run<B: StorageBackend>(backend: &B, list: &str) -> Result<CmdResult> {
    let name = ListName::new(list)?;
    let mut result = CmdResult::default();
    if name.as_str() != list {
        result.add_message(CmdMessage::info(format!(
            "List name {:?} sanitized to {:?}",
            list,
            name.as_str()
        )));
    }

    if backend.create_list(&name)? {
        result.add_message(CmdMessage::success(format!("Created list {}", name)));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "List {} already exists",
            name
        )));
    }
    Ok(result)
}
