use super::backend::{ListLock, StorageBackend};
use crate::error::Result;
use crate::model::{sanitize_list_name, ListName};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem backend rooted at the lists directory.
///
/// ```text
/// <lists_dir>/
/// ├── groceries.txt        # one list
/// ├── .groceries.lock      # advisory lock for read-modify-write cycles
/// ├── events.csv           # shared event log
/// └── groceries_files/     # attachments of `groceries`
/// ```
pub struct FsBackend {
    root: PathBuf,
    list_ext: String,
    events_file: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            list_ext: ".txt".to_string(),
            events_file: "events.csv".to_string(),
        }
    }

    pub fn with_list_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.list_ext = ext.to_string();
        } else {
            self.list_ext = format!(".{}", ext);
        }
        self
    }

    pub fn with_events_file(mut self, name: &str) -> Self {
        self.events_file = name.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn list_path(&self, list: &ListName) -> PathBuf {
        self.root.join(format!("{}{}", list, self.list_ext))
    }

    pub fn events_path(&self) -> PathBuf {
        self.root.join(&self.events_file)
    }

    fn lock_path(&self, list: &ListName) -> PathBuf {
        self.root.join(format!(".{}.lock", list))
    }

    fn files_dir(&self, list: &ListName) -> PathBuf {
        self.root.join(format!("{}_files", list))
    }
}

impl StorageBackend for FsBackend {
    fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                if let Some(base) = name.strip_suffix(self.list_ext.as_str()) {
                    // Names that would not survive sanitizing could never be opened.
                    if !base.is_empty() && sanitize_list_name(base) == base {
                        names.push(base.to_string());
                    }
                }
            }
        }
        Ok(names)
    }

    fn list_exists(&self, list: &ListName) -> bool {
        self.list_path(list).is_file()
    }

    fn read_list(&self, list: &ListName) -> Result<Option<String>> {
        match fs::read_to_string(self.list_path(list)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_list(&self, list: &ListName, content: &str) -> Result<()> {
        let target = self.list_path(list);

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", list, Uuid::new_v4()));
        fs::write(&tmp_path, content)?;
        if let Err(e) = fs::rename(&tmp_path, &target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    fn create_list(&self, list: &ListName) -> Result<bool> {
        fs::create_dir_all(&self.root)?;
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.list_path(list))
        {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn lock_list(&self, list: &ListName) -> Result<ListLock> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path(list))?;
        file.lock_exclusive()?;
        Ok(ListLock::file(file))
    }

    fn append_event(&self, record: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.events_path())?;
        file.write_all(record.as_bytes())
    }

    fn write_attachment(&self, list: &ListName, file_id: &str, bytes: &[u8]) -> io::Result<()> {
        let dir = self.files_dir(list);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(file_id), bytes)
    }

    fn read_attachment(&self, list: &ListName, file_id: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.attachment_path(list, file_id)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn remove_attachment(&self, list: &ListName, file_id: &str) -> io::Result<()> {
        fs::remove_file(self.attachment_path(list, file_id))
    }

    fn attachment_path(&self, list: &ListName, file_id: &str) -> PathBuf {
        self.files_dir(list).join(file_id)
    }
}
