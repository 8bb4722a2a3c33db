use crate::attachments::Attachments;
use crate::commands::CmdResult;
use crate::config::ShoplistConfig;
use crate::error::Result;
use crate::model::ListName;
use crate::store::backend::StorageBackend;

pub fn run<B: StorageBackend>(
    backend: &B,
    config: &ShoplistConfig,
    list: &str,
    file_id: &str,
    requested_name: Option<&str>,
) -> Result<CmdResult> {
    let list = ListName::new(list)?;
    let download = Attachments::new(backend, config).fetch(&list, file_id, requested_name)?;
    Ok(CmdResult::default().with_download(download))
}
