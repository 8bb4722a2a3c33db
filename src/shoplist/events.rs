//! Append-only audit trail of item actions.
//!
//! Every action applied to a list produces one record in the shared event log:
//!
//! ```text
//! <unix timestamp>,<list>,<item>,<action>\r\n
//! ```
//!
//! Records are never read back. Fields are written as-is (no CSV quoting).

use crate::error::{Result, ShoplistError};
use crate::model::{Action, ListName};
use crate::store::backend::StorageBackend;
use chrono::Utc;

pub struct EventLogger<'a, B: StorageBackend> {
    backend: &'a B,
}

impl<'a, B: StorageBackend> EventLogger<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Appends a record stamped with the current time.
    ///
    /// A failure is returned as [`ShoplistError::EventLogWrite`]; it is up to the
    /// caller whether that is fatal.
    pub fn log(&self, list: &ListName, item: &str, action: &Action) -> Result<()> {
        let record = format_record(Utc::now().timestamp(), list.as_str(), item, action.code());
        self.backend
            .append_event(&record)
            .map_err(ShoplistError::EventLogWrite)
    }
}

pub fn format_record(timestamp: i64, list: &str, item: &str, action: &str) -> String {
    format!("{},{},{},{}\r\n", timestamp, list, item, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn formats_record_with_crlf() {
        assert_eq!(
            format_record(1700000000, "groceries", "milk", "c"),
            "1700000000,groceries,milk,c\r\n"
        );
    }

    #[test]
    fn logs_with_current_timestamp() {
        let backend = MemBackend::new();
        let logger = EventLogger::new(&backend);
        let list = ListName::new("groceries").unwrap();

        let before = Utc::now().timestamp();
        logger.log(&list, "milk", &Action::Hide).unwrap();
        let after = Utc::now().timestamp();

        let events = backend.events();
        assert_eq!(events.len(), 1);
        let fields: Vec<_> = events[0].trim_end_matches("\r\n").split(',').collect();
        assert_eq!(fields[1..], ["groceries", "milk", "h"]);
        let ts: i64 = fields[0].parse().unwrap();
        assert!(ts >= before && ts <= after);
    }

    #[test]
    fn failure_is_reported_as_event_log_error() {
        let backend = MemBackend::new();
        backend.set_simulate_event_error(true);
        let logger = EventLogger::new(&backend);
        let list = ListName::new("groceries").unwrap();

        let err = logger.log(&list, "milk", &Action::Create).unwrap_err();
        assert!(matches!(err, ShoplistError::EventLogWrite(_)));
    }
}
