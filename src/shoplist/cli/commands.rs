//! Dispatch from parsed arguments to the API, and from results to the terminal.
//!
//! - `run()`: main dispatch logic (called by `main.rs`)
//! - `init_context()`: resolves the home directory, loads config, builds the API
//! - `handle_*()`: per-command handlers that call the API and print

use super::render::{print_messages, render_config, render_items, render_lists};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use shoplist::api::{ConfigAction, ShoplistApi, ShoplistPaths};
use shoplist::config::ShoplistConfig;
use shoplist::error::{Result, ShoplistError};
use shoplist::store::fs_backend::FsBackend;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const HOME_ENV: &str = "SHOPLIST_HOME";
const LOG_ENV: &str = "SHOPLIST_LOG";

struct AppContext {
    api: ShoplistApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Init) => handle_init(&ctx),
        Some(Commands::New { list }) => handle_new(&ctx, &list),
        Some(Commands::Lists) | None => handle_lists(&ctx),
        Some(Commands::Items { list, by_state }) => handle_items(&ctx, &list, by_state),
        Some(Commands::Check { list, items }) => {
            print_result(ctx.api.check_items(&list, &items)?)
        }
        Some(Commands::Uncheck { list, items }) => {
            print_result(ctx.api.uncheck_items(&list, &items)?)
        }
        Some(Commands::Hide { list, items }) => print_result(ctx.api.hide_items(&list, &items)?),
        Some(Commands::Delete { list, items }) => {
            print_result(ctx.api.delete_items(&list, &items)?)
        }
        Some(Commands::Act { list, request }) => {
            print_result(ctx.api.apply_request(&list, &request)?)
        }
        Some(Commands::Attach { list, path }) => handle_attach(&ctx, &list, &path),
        Some(Commands::Fetch {
            list,
            file_id,
            name,
            output,
        }) => handle_fetch(&ctx, &list, &file_id, name.as_deref(), output.as_deref()),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new(filter)
    } else {
        tracing_subscriber::EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| filter.into())
    };
    // A subscriber may already be installed; keep it.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn resolve_home(cli: &Cli) -> Result<PathBuf> {
    if let Some(home) = &cli.home {
        return Ok(home.clone());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "shoplist", "shoplist")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ShoplistError::Config("Could not determine a home directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let home = resolve_home(cli)?;
    let config = ShoplistConfig::load(&home)?;
    let lists_dir = config.lists_dir_in(&home);
    debug!(home = %home.display(), lists_dir = %lists_dir.display(), "context");

    let backend = FsBackend::new(lists_dir.clone())
        .with_list_ext(&config.list_ext)
        .with_events_file(&config.events_file);
    let paths = ShoplistPaths { home, lists_dir };

    Ok(AppContext {
        api: ShoplistApi::new(backend, config, paths),
    })
}

fn print_result(result: shoplist::api::CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    print_result(ctx.api.init()?)
}

fn handle_new(ctx: &AppContext, list: &str) -> Result<()> {
    print_result(ctx.api.new_list(list)?)
}

fn handle_lists(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.get_lists()?;
    print!("{}", render_lists(&result.listed_lists));
    print_messages(&result.messages);
    Ok(())
}

fn handle_items(ctx: &AppContext, list: &str, by_state: bool) -> Result<()> {
    let result = ctx.api.view_items(list, by_state)?;
    if let Some(entry) = &result.list {
        print!("{}", render_items(entry, &result.listed_items));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_attach(ctx: &AppContext, list: &str, path: &Path) -> Result<()> {
    let bytes = fs::read(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let result = ctx.api.attach(list, &filename, &bytes)?;
    print_messages(&result.messages);
    if let Some(attachment) = &result.attachment {
        println!("{}", attachment.file_id);
    }
    Ok(())
}

fn handle_fetch(
    ctx: &AppContext,
    list: &str,
    file_id: &str,
    name: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let result = ctx.api.fetch(list, file_id, name)?;
    let download = result
        .download
        .ok_or_else(|| ShoplistError::Api("fetch returned no attachment".to_string()))?;

    match output {
        Some(path) if path == Path::new("-") => {
            std::io::stdout().write_all(&download.bytes)?;
        }
        _ => {
            let path = output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(&download.download_name));
            fs::write(&path, &download.bytes)?;
            println!(
                "Saved {} ({}, {} bytes)",
                path.display(),
                download.mime_type,
                download.bytes.len()
            );
        }
    }
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config_cmd(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(&config.list_all()));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
