use crate::error::Result;
use crate::model::ListName;
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// `ItemStore`, `Catalog`, `EventLogger` and `Attachments` handle the "what"
/// (encoding, state transitions, naming rules).
///
/// Event and attachment operations return plain `io::Result`: their failures
/// are classified by the caller (`EventLogWrite`, `AttachmentIo`), which decides
/// whether they are fatal.
pub trait StorageBackend {
    // --- Lists ---

    /// Base names of all list files, in no particular order.
    /// Fails if the lists directory itself is missing.
    fn list_names(&self) -> Result<Vec<String>>;

    fn list_exists(&self, list: &ListName) -> bool;

    /// Raw list text. `Ok(None)` if the list does not exist.
    fn read_list(&self, list: &ListName) -> Result<Option<String>>;

    /// Replace the list text. MUST be atomic (write to tmp then rename).
    fn write_list(&self, list: &ListName, content: &str) -> Result<()>;

    /// Create an empty list. Returns false if it already existed.
    fn create_list(&self, list: &ListName) -> Result<bool>;

    /// Exclusive lock over a list, held until the guard is dropped.
    fn lock_list(&self, list: &ListName) -> Result<ListLock>;

    // --- Event log ---

    /// Append one already formatted record to the shared event log.
    fn append_event(&self, record: &str) -> io::Result<()>;

    // --- Attachments ---

    fn write_attachment(&self, list: &ListName, file_id: &str, bytes: &[u8]) -> io::Result<()>;

    /// `Ok(None)` if the attachment does not exist.
    fn read_attachment(&self, list: &ListName, file_id: &str) -> io::Result<Option<Vec<u8>>>;

    /// Fails with `ErrorKind::NotFound` if the attachment does not exist.
    fn remove_attachment(&self, list: &ListName, file_id: &str) -> io::Result<()>;

    /// For FsBackend, the real path. For MemBackend, a virtual path.
    fn attachment_path(&self, list: &ListName, file_id: &str) -> PathBuf;
}

/// Guard returned by [`StorageBackend::lock_list`].
pub struct ListLock {
    file: Option<File>,
}

impl ListLock {
    pub(crate) fn file(file: File) -> Self {
        Self { file: Some(file) }
    }

    /// A lock with nothing behind it, for backends without concurrent access.
    pub(crate) fn noop() -> Self {
        Self { file: None }
    }
}

impl Drop for ListLock {
    fn drop(&mut self) {
        if let Some(file) = &self.file {
            let _ = fs2::FileExt::unlock(file);
        }
    }
}
