use crate::commands::{action, CmdResult};
use crate::config::ShoplistConfig;
use crate::error::Result;
use crate::model::ItemRequest;
use crate::store::backend::StorageBackend;

/// Applies a raw `<action><sep><item>` request body.
pub fn run<B: StorageBackend>(
    backend: &B,
    config: &ShoplistConfig,
    list: &str,
    body: &str,
) -> Result<CmdResult> {
    let request = ItemRequest::parse(body, config.separator)?;
    action::run(backend, config, list, &[request.item], &request.action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShoplistError;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn applies_request_body() {
        let backend = MemBackend::new().with_list("groceries", "milk|1");
        run(&backend, &ShoplistConfig::default(), "groceries", "u|milk").unwrap();
        assert_eq!(backend.raw_list("groceries").unwrap(), "milk|0");
    }

    #[test]
    fn escaped_separator_is_stored_verbatim() {
        let backend = MemBackend::new().with_list("groceries", "");
        run(
            &backend,
            &ShoplistConfig::default(),
            "groceries",
            "c|salt &#124; pepper",
        )
        .unwrap();
        assert_eq!(
            backend.raw_list("groceries").unwrap(),
            "salt &#124; pepper|1"
        );
    }

    #[test]
    fn body_without_separator_is_rejected() {
        let backend = MemBackend::new().with_list("groceries", "");
        assert!(matches!(
            run(&backend, &ShoplistConfig::default(), "groceries", "cmilk"),
            Err(ShoplistError::MalformedRequest(_))
        ));
        assert!(backend.events().is_empty());
    }
}
