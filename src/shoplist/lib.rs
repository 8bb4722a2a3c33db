//! # Shoplist Architecture
//!
//! Shoplist is a **UI-agnostic shopping-list library**: named lists of items,
//! each unchecked, checked or hidden, persisted as flat text files, with an
//! audit log of every change and optional file attachments. The `shoplist`
//! binary is one client of it; a web front end could sit on the same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One operation per module, returns CmdResult              │
//! │  - Turns tolerated failures into warning messages           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Services (store/, catalog, events, attachments)            │
//! │  - ItemStore: list codec and read-modify-write actions      │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain arguments and returns plain types.
//! It never writes to stdout/stderr and never exits the process. Diagnostics
//! go through `tracing`; the binary decides where they end up.
//!
//! ## Storage Layout
//!
//! ```text
//! <home>/config.json
//! <home>/lists/groceries.txt          milk|1\r\neggs|0
//! <home>/lists/events.csv             1700000000,groceries,milk,c\r\n
//! <home>/lists/groceries_files/<id>   attachment bytes
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`store`]: List codec, [`store::ItemStore`] and storage backends
//! - [`catalog`]: Enumerating lists and their display names
//! - [`events`]: The append-only action log
//! - [`attachments`]: Attachment references and files
//! - [`model`]: Core data types (`ItemState`, `Action`, `ShoppingList`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod attachments;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod store;
