use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShoplistError {
    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("Malformed line {line} in list {list}: {content:?}")]
    MalformedLine {
        list: String,
        line: usize,
        content: String,
    },

    #[error("Unsafe identifier: {0:?}")]
    UnsafeIdentifier(String),

    #[error("Invalid item name: {0:?}")]
    InvalidItemName(String),

    #[error("Malformed item request: {0:?}")]
    MalformedRequest(String),

    #[error("Attachment {file_id}: {source}")]
    AttachmentIo {
        file_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Attachment not found: {0}")]
    AttachmentNotFound(String),

    #[error("File uploads are disabled")]
    AttachmentsDisabled,

    #[error("File too large: {size} bytes (max {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Empty filename")]
    EmptyFilename,

    #[error("Failed to append to event log: {0}")]
    EventLogWrite(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ShoplistError>;
