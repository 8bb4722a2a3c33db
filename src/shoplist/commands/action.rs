use crate::attachments::{AttachmentRef, Attachments};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::ShoplistConfig;
use crate::error::Result;
use crate::model::{Action, ListName};
use crate::store::backend::StorageBackend;
use crate::store::ItemStore;
use tracing::warn;

/// Applies `action` to each of `items` in order.
///
/// Deleting an item that references an attachment also removes the
/// attachment, once the item itself is gone. Removal is best-effort: a failure
/// becomes a warning, as does a failed event log append.
pub fn run<B: StorageBackend>(
    backend: &B,
    config: &ShoplistConfig,
    list: &str,
    items: &[String],
    action: &Action,
) -> Result<CmdResult> {
    let list = ListName::new(list)?;
    let store = ItemStore::new(backend, config);
    let attachments = Attachments::new(backend, config);
    let mut result = CmdResult::default();

    for item in items {
        let report = store.apply_action(&list, item, action)?;
        result.add_message(CmdMessage::success(format!(
            "{} {}",
            verb(action),
            item_label(item)
        )));

        if *action == Action::Delete && attachments.enabled() {
            if let Some(attachment) = AttachmentRef::parse(item) {
                if let Err(e) = attachments.delete(&list, &attachment.file_id) {
                    warn!(list = %list, file_id = %attachment.file_id, error = %e, "attachment not deleted");
                    result.add_message(CmdMessage::warning(format!(
                        "Could not delete attachment {}: {}",
                        attachment.original_name, e
                    )));
                }
            }
        }
        if let Some(e) = &report.event_log_error {
            result.add_message(CmdMessage::warning(e.to_string()));
        }
        result.reports.push(report);
    }

    Ok(result)
}

fn verb(action: &Action) -> String {
    match action {
        Action::Create => "Checked".to_string(),
        Action::Uncheck => "Unchecked".to_string(),
        Action::Hide => "Hid".to_string(),
        Action::Delete => "Deleted".to_string(),
        Action::Other(code) => format!("Applied {:?} to", code),
    }
}

/// Attachments are shown by their original file name.
pub fn item_label(item: &str) -> String {
    match AttachmentRef::parse(item) {
        Some(attachment) => format!("[{}]", attachment.original_name),
        None => item.to_string(),
    }
}
