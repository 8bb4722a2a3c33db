//! # Attachments
//!
//! Files uploaded to a list live in `<lists_dir>/<list>_files/<file id>` and are
//! referenced from an item whose *name* encodes the reference:
//!
//! ```text
//! file://<file id>::<original name>::<mime type>
//! ```
//!
//! An older encoding separated the parts with `|`, which clients escaped as
//! `&#124;`. Both are read; only the `::` form is ever written.
//!
//! File ids are generated (`<uuid><ext>`) and must survive [`secure_filename`]
//! unchanged. Anything else is refused as an unsafe identifier before it gets
//! near the filesystem.

use crate::config::ShoplistConfig;
use crate::error::{Result, ShoplistError};
use crate::model::ListName;
use crate::store::backend::StorageBackend;
use crate::store::validate_item_name;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

pub const FILE_SCHEME: &str = "file://";
pub const DEFAULT_DOWNLOAD_NAME: &str = "download";
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

const MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("zip", "application/zip"),
    ("md", "text/markdown"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentRef {
    pub file_id: String,
    pub original_name: String,
    pub mime_type: String,
}

impl AttachmentRef {
    /// Parses an item name. Returns `None` for plain items.
    pub fn parse(item: &str) -> Option<Self> {
        let content = item.strip_prefix(FILE_SCHEME)?;
        let decoded;
        let parts: Vec<&str> = if content.contains("::") {
            content.split("::").collect()
        } else {
            decoded = content.replace("&#124;", "|");
            decoded.split('|').collect()
        };

        let part = |idx: usize, default: &str| {
            parts
                .get(idx)
                .filter(|p| !p.is_empty())
                .copied()
                .unwrap_or(default)
                .to_string()
        };

        Some(Self {
            file_id: parts.first().copied().unwrap_or_default().to_string(),
            original_name: part(1, DEFAULT_DOWNLOAD_NAME),
            mime_type: part(2, DEFAULT_MIME_TYPE),
        })
    }
}

impl fmt::Display for AttachmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}::{}::{}",
            FILE_SCHEME, self.file_id, self.original_name, self.mime_type
        )
    }
}

pub fn is_attachment(item: &str) -> bool {
    item.starts_with(FILE_SCHEME)
}

/// Reduces a user supplied filename to a safe, flat ASCII name.
///
/// Accented characters are folded to ASCII (NFKD, then non-ASCII dropped),
/// `/` becomes whitespace, whitespace runs become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped, and leading/trailing `.`/`_` are trimmed.
/// The result may be empty.
pub fn secure_filename(name: &str) -> String {
    let flattened: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' { ' ' } else { c })
        .collect();
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Returns `file_id` if sanitizing it is a no-op.
pub fn checked_file_id(file_id: &str) -> Result<&str> {
    if file_id.is_empty() || secure_filename(file_id) != file_id {
        return Err(ShoplistError::UnsafeIdentifier(file_id.to_string()));
    }
    Ok(file_id)
}

/// Extension including the dot, or "" when there is none.
pub fn extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[idx..],
        _ => "",
    }
}

pub fn mime_for_extension(ext: &str) -> &'static str {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// Attachment bytes ready to be handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_id: String,
    pub download_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

pub struct Attachments<'a, B: StorageBackend> {
    backend: &'a B,
    enabled: bool,
    max_bytes: u64,
    separator: char,
}

impl<'a, B: StorageBackend> Attachments<'a, B> {
    pub fn new(backend: &'a B, config: &ShoplistConfig) -> Self {
        Self {
            backend,
            enabled: config.file_upload,
            max_bytes: config.max_file_size_bytes(),
            separator: config.separator,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    fn ensure_enabled(&self) -> Result<()> {
        if !self.enabled {
            return Err(ShoplistError::AttachmentsDisabled);
        }
        Ok(())
    }

    /// Stores `bytes` under a fresh id and returns the reference to put in an item.
    pub fn store(
        &self,
        list: &ListName,
        original_filename: &str,
        bytes: &[u8],
    ) -> Result<AttachmentRef> {
        self.ensure_enabled()?;

        let original_name = secure_filename(original_filename);
        if original_name.is_empty() {
            return Err(ShoplistError::EmptyFilename);
        }
        let size = bytes.len() as u64;
        if size > self.max_bytes {
            return Err(ShoplistError::FileTooLarge {
                size,
                max: self.max_bytes,
            });
        }

        let ext = extension(&original_name);
        let attachment = AttachmentRef {
            file_id: format!("{}{}", Uuid::new_v4(), ext),
            mime_type: mime_for_extension(ext).to_string(),
            original_name,
        };
        // Must be a valid item name before any bytes are written.
        validate_item_name(&attachment.to_string(), self.separator)?;

        let file_id = &attachment.file_id;
        self.backend
            .write_attachment(list, file_id, bytes)
            .map_err(|source| ShoplistError::AttachmentIo {
                file_id: file_id.clone(),
                source,
            })?;
        info!(
            list = %list,
            path = %self.backend.attachment_path(list, file_id).display(),
            size,
            "stored attachment"
        );

        Ok(attachment)
    }

    pub fn delete(&self, list: &ListName, file_id: &str) -> Result<()> {
        let file_id = checked_file_id(file_id)?;
        self.backend
            .remove_attachment(list, file_id)
            .map_err(|source| ShoplistError::AttachmentIo {
                file_id: file_id.to_string(),
                source,
            })?;
        debug!(list = %list, file_id, "deleted attachment");
        Ok(())
    }

    /// Reads an attachment. The download name is the sanitized `requested_name`,
    /// falling back to the file id.
    pub fn fetch(
        &self,
        list: &ListName,
        file_id: &str,
        requested_name: Option<&str>,
    ) -> Result<Download> {
        self.ensure_enabled()?;
        let file_id = checked_file_id(file_id)?;

        let bytes = self
            .backend
            .read_attachment(list, file_id)
            .map_err(|source| ShoplistError::AttachmentIo {
                file_id: file_id.to_string(),
                source,
            })?
            .ok_or_else(|| ShoplistError::AttachmentNotFound(file_id.to_string()))?;

        let download_name = requested_name
            .map(secure_filename)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| file_id.to_string());

        Ok(Download {
            file_id: file_id.to_string(),
            mime_type: mime_for_extension(extension(file_id)).to_string(),
            download_name,
            bytes,
        })
    }
}
