use super::backend::{ListLock, StorageBackend};
use crate::error::{Result, ShoplistError};
use crate::model::ListName;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since shoplist is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    lists: RefCell<HashMap<String, String>>,
    events: RefCell<Vec<String>>,
    attachments: RefCell<HashMap<(String, String), Vec<u8>>>,
    simulate_write_error: Cell<bool>,
    simulate_event_error: Cell<bool>,
    simulate_attachment_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a list with raw text, as if it had been provisioned on disk.
    pub fn with_list(self, name: &str, content: &str) -> Self {
        self.lists
            .borrow_mut()
            .insert(name.to_string(), content.to_string());
        self
    }

    pub fn raw_list(&self, name: &str) -> Option<String> {
        self.lists.borrow().get(name).cloned()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// Number of successful list writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn has_attachment(&self, list: &str, file_id: &str) -> bool {
        self.attachments
            .borrow()
            .contains_key(&(list.to_string(), file_id.to_string()))
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.borrow().len()
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn set_simulate_event_error(&self, simulate: bool) {
        self.simulate_event_error.set(simulate);
    }

    pub fn set_simulate_attachment_error(&self, simulate: bool) {
        self.simulate_attachment_error.set(simulate);
    }

    fn attachment_error(&self) -> io::Result<()> {
        if self.simulate_attachment_error.get() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Simulated attachment error",
            ));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.lists.borrow().keys().cloned().collect())
    }

    fn list_exists(&self, list: &ListName) -> bool {
        self.lists.borrow().contains_key(list.as_str())
    }

    fn read_list(&self, list: &ListName) -> Result<Option<String>> {
        Ok(self.lists.borrow().get(list.as_str()).cloned())
    }

    fn write_list(&self, list: &ListName, content: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ShoplistError::Io(io::Error::other("Simulated write error")));
        }
        self.lists
            .borrow_mut()
            .insert(list.to_string(), content.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn create_list(&self, list: &ListName) -> Result<bool> {
        let mut lists = self.lists.borrow_mut();
        if lists.contains_key(list.as_str()) {
            return Ok(false);
        }
        lists.insert(list.to_string(), String::new());
        Ok(true)
    }

    fn lock_list(&self, _list: &ListName) -> Result<ListLock> {
        Ok(ListLock::noop())
    }

    fn append_event(&self, record: &str) -> io::Result<()> {
        if self.simulate_event_error.get() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Simulated event log error",
            ));
        }
        self.events.borrow_mut().push(record.to_string());
        Ok(())
    }

    fn write_attachment(&self, list: &ListName, file_id: &str, bytes: &[u8]) -> io::Result<()> {
        self.attachment_error()?;
        self.attachments
            .borrow_mut()
            .insert((list.to_string(), file_id.to_string()), bytes.to_vec());
        Ok(())
    }

    fn read_attachment(&self, list: &ListName, file_id: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self
            .attachments
            .borrow()
            .get(&(list.to_string(), file_id.to_string()))
            .cloned())
    }

    fn remove_attachment(&self, list: &ListName, file_id: &str) -> io::Result<()> {
        self.attachment_error()?;
        self.attachments
            .borrow_mut()
            .remove(&(list.to_string(), file_id.to_string()))
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such attachment"))
    }

    fn attachment_path(&self, list: &ListName, file_id: &str) -> PathBuf {
        PathBuf::from(format!("mem://{}_files/{}", list, file_id))
    }
}
