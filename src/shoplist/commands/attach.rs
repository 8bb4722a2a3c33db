use crate::attachments::Attachments;
use crate::commands::{action, CmdMessage, CmdResult};
use crate::config::ShoplistConfig;
use crate::error::{Result, ShoplistError};
use crate::model::{Action, ListName};
use crate::store::backend::StorageBackend;
use tracing::warn;

/// Stores `bytes` as an attachment of `list` and adds a checked item
/// referencing it.
pub fn run<B: StorageBackend>(
    backend: &B,
    config: &ShoplistConfig,
    list: &str,
    filename: &str,
    bytes: &[u8],
) -> Result<CmdResult> {
    let name = ListName::new(list)?;
    if !backend.list_exists(&name) {
        return Err(ShoplistError::ListNotFound(name.to_string()));
    }

    let attachments = Attachments::new(backend, config);
    let attachment = attachments.store(&name, filename, bytes)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Stored {} ({} bytes) as {}",
        attachment.original_name,
        bytes.len(),
        attachment.file_id
    )));

    let applied = match action::run(
        backend,
        config,
        name.as_str(),
        &[attachment.to_string()],
        &Action::Create,
    ) {
        Ok(applied) => applied,
        Err(e) => {
            // Nothing references the file yet.
            if let Err(cleanup) = attachments.delete(&name, &attachment.file_id) {
                warn!(list = %name, file_id = %attachment.file_id, error = %cleanup, "orphaned attachment");
            }
            return Err(e);
        }
    };
    result.merge(applied);
    Ok(result.with_attachment(attachment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemState;
    use crate::store::mem_backend::MemBackend;
    use crate::store::ItemStore;

    fn uploads() -> ShoplistConfig {
        ShoplistConfig {
            file_upload: true,
            ..ShoplistConfig::default()
        }
    }

    #[test]
    fn attaches_and_checks_item() {
        let backend = MemBackend::new().with_list("groceries", "milk|0");
        let config = uploads();
        let result = run(&backend, &config, "groceries", "list photo.jpg", b"jpeg").unwrap();

        let attachment = result.attachment.unwrap();
        assert_eq!(attachment.original_name, "list_photo.jpg");
        assert_eq!(attachment.mime_type, "image/jpeg");
        assert!(backend.has_attachment("groceries", &attachment.file_id));

        let items = ItemStore::new(&backend, &config)
            .load(&ListName::new("groceries").unwrap())
            .unwrap();
        assert_eq!(items.get(&attachment.to_string()), Some(ItemState::Checked));
        assert_eq!(result.reports.len(), 1);
    }

    #[test]
    fn missing_list_stores_nothing() {
        let backend = MemBackend::new();
        assert!(matches!(
            run(&backend, &uploads(), "nope", "a.png", b"x"),
            Err(ShoplistError::ListNotFound(_))
        ));
    }

    #[test]
    fn disabled_uploads() {
        let backend = MemBackend::new().with_list("groceries", "");
        assert!(matches!(
            run(&backend, &ShoplistConfig::default(), "groceries", "a.png", b"x"),
            Err(ShoplistError::AttachmentsDisabled)
        ));
        assert_eq!(backend.raw_list("groceries").unwrap(), "");
    }

    #[test]
    fn separator_inside_references_stores_nothing() {
        let backend = MemBackend::new().with_list("groceries", "");
        let config = ShoplistConfig {
            separator: ':',
            ..uploads()
        };
        assert!(matches!(
            run(&backend, &config, "groceries", "a.png", b"png"),
            Err(ShoplistError::InvalidItemName(_))
        ));
        assert_eq!(backend.attachment_count(), 0);
        assert_eq!(backend.raw_list("groceries").unwrap(), "");
    }

    #[test]
    fn failed_item_write_removes_the_stored_file() {
        let backend = MemBackend::new().with_list("groceries", "");
        backend.set_simulate_write_error(true);
        assert!(matches!(
            run(&backend, &uploads(), "groceries", "a.png", b"png"),
            Err(ShoplistError::Io(_))
        ));
        assert_eq!(backend.attachment_count(), 0);
    }

    #[test]
    fn custom_separator_keeps_reference_intact() {
        let backend = MemBackend::new().with_list("groceries", "");
        let config = ShoplistConfig {
            separator: ';',
            ..uploads()
        };
        let result = run(&backend, &config, "groceries", "a.txt", b"hi").unwrap();
        let stored = backend.raw_list("groceries").unwrap();
        assert_eq!(stored, format!("{};1", result.attachment.unwrap()));
    }
}
