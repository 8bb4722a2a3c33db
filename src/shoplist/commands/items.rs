use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::ShoplistConfig;
use crate::error::Result;
use crate::model::{sort_items, ItemOrder, ListName};
use crate::store::backend::StorageBackend;
use crate::store::ItemStore;

/// Items of one list, by name, optionally regrouped by state.
pub fn run<B: StorageBackend>(
    backend: &B,
    config: &ShoplistConfig,
    list: &str,
    by_state: bool,
) -> Result<CmdResult> {
    let list = ListName::new(list)?;
    let items = ItemStore::new(backend, config).load(&list)?;

    let mut items = items.sorted(ItemOrder::Name);
    if by_state {
        sort_items(&mut items, ItemOrder::State);
    }

    let entry = Catalog::new(backend, config).entry(list.as_str());
    let mut result = CmdResult::default();
    if items.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} is empty.",
            entry.display_name
        )));
    }
    Ok(result.with_items(entry, items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShoplistError;
    use crate::model::ItemState;
    use crate::store::mem_backend::MemBackend;

    fn view(backend: &MemBackend, by_state: bool) -> Vec<(String, ItemState)> {
        run(backend, &ShoplistConfig::default(), "groceries", by_state)
            .unwrap()
            .listed_items
            .into_iter()
            .map(|item| (item.name, item.state))
            .collect()
    }

    #[test]
    fn sorted_by_name() {
        let backend = MemBackend::new().with_list("groceries", "milk|1\r\napples|0\r\nbread|2");
        let names: Vec<_> = view(&backend, false).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["apples", "bread", "milk"]);
    }

    #[test]
    fn sorted_by_state_then_name() {
        let backend = MemBackend::new()
            .with_list("groceries", "a|1\r\nb|0\r\nc|2\r\nd|1\r\ne|0");
        assert_eq!(
            view(&backend, true),
            vec![
                ("c".to_string(), ItemState::Hidden),
                ("a".to_string(), ItemState::Checked),
                ("d".to_string(), ItemState::Checked),
                ("b".to_string(), ItemState::Unchecked),
                ("e".to_string(), ItemState::Unchecked),
            ]
        );
    }

    #[test]
    fn list_name_is_sanitized() {
        let backend = MemBackend::new().with_list("groceries", "milk|0");
        let result = run(&backend, &ShoplistConfig::default(), "../groceries", false).unwrap();
        assert_eq!(result.list.unwrap().name, "groceries");
        assert_eq!(result.listed_items.len(), 1);
    }

    #[test]
    fn missing_list() {
        let backend = MemBackend::new();
        assert!(matches!(
            run(&backend, &ShoplistConfig::default(), "nope", false),
            Err(ShoplistError::ListNotFound(_))
        ));
    }

    #[test]
    fn multi_line_list_uses_display_name() {
        let backend = MemBackend::new().with_list("multiline_notes", "");
        let result = run(&backend, &ShoplistConfig::default(), "multiline_notes", false).unwrap();
        let entry = result.list.unwrap();
        assert!(entry.multi_line);
        assert_eq!(entry.display_name, "notes");
        assert_eq!(result.messages[0].content, "notes is empty.");
    }
}
