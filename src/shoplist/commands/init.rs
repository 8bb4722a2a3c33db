use crate::commands::{CmdMessage, CmdResult, ShoplistPaths};
use crate::error::Result;
use std::fs;

pub fn run(paths: &ShoplistPaths) -> Result<CmdResult> {
    fs::create_dir_all(&paths.home)?;
    fs::create_dir_all(&paths.lists_dir)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized shoplist at {}",
        paths.lists_dir.display()
    )));
    Ok(result)
}
