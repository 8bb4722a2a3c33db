use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shoplist", bin_name = "shoplist", version)]
#[command(about = "Shopping lists kept in plain text files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Home directory holding config.json and the lists [env: SHOPLIST_HOME]
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub home: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the home and lists directories
    Init,

    /// Create an empty list
    New { list: String },

    /// Show all lists
    #[command(alias = "ls")]
    Lists,

    /// Show the items of a list
    Items {
        list: String,

        /// Group items by state (hidden, checked, unchecked)
        #[arg(long)]
        by_state: bool,
    },

    /// Check items, adding them if missing
    Check {
        list: String,
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Uncheck items, adding them if missing
    Uncheck {
        list: String,
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Hide items, adding them if missing
    Hide {
        list: String,
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Delete items (and their attachments)
    #[command(alias = "rm")]
    Delete {
        list: String,
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Apply a raw "<action><separator><item>" request, e.g. "c|milk"
    Act { list: String, request: String },

    /// Attach a file to a list as a checked item
    Attach { list: String, path: PathBuf },

    /// Write an attachment to a file or stdout
    Fetch {
        list: String,
        file_id: String,

        /// File name to save as (defaults to the file id)
        #[arg(long)]
        name: Option<String>,

        /// Output path; "-" writes to stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show or set configuration
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}
