//! # CLI Layer
//!
//! One possible UI client for shoplist, not the application itself. This is
//! the only place that touches stdout/stderr, reads files named on the command
//! line, installs the tracing subscriber, and formats output for humans.
//!
//! - `setup`: clap definitions
//! - `commands`: `run()`, context setup and one `handle_*` per command
//! - `render`: `CmdResult` data to terminal text
//! - `styles`: terminal styles

mod commands;
mod render;
mod setup;
mod styles;

pub use commands::run;
