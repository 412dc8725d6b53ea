use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    screen::CollectionView, ClientError, FieldUpdate, HttpBookClient, LibraryController,
};
use shared::domain::Book;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

mod config;
mod render;

use config::{load_settings, validate_base_url, DEFAULT_CONFIG_PATH};
use render::{render_delete_dialog, render_edit_dialog, render_screen};

#[derive(Parser, Debug)]
#[command(name = "library", about = "Browse and maintain a remote book library")]
struct Cli {
    /// Base URL of the book service, e.g. http://localhost:8080/api/books
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every book.
    List,
    /// Delete a book after confirmation.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Edit fields of a book and save it.
    Edit {
        id: String,
        /// Field assignment such as `title=Dune` or `pageCount=412`.
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        set: Vec<String>,
    },
}

type LogHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

/// Installs the stderr subscriber before anything else can log.
///
/// `RUST_LOG` wins; otherwise `APP__LOG_FILTER`, then `info`. The config
/// file's filter is applied later through the returned handle.
fn init_tracing() -> LogHandle {
    let initial = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| {
            std::env::var("APP__LOG_FILTER")
                .ok()
                .and_then(|directives| EnvFilter::try_new(directives).ok())
        })
        .unwrap_or_else(|| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_filter(filter_layer))
        .init();
    handle
}

fn apply_log_filter(handle: &LogHandle, directives: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    match EnvFilter::try_new(directives) {
        Ok(parsed) => {
            if let Err(err) = handle.modify(|filter| *filter = parsed) {
                warn!("failed to apply log filter: {err}");
            }
        }
        Err(err) => warn!(filter = directives, "invalid log filter: {err}"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_handle = init_tracing();
    let mut settings = load_settings(&cli.config);
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }
    apply_log_filter(&log_handle, &settings.log_filter);

    let base_url = validate_base_url(&settings.api_base_url)?;
    info!(%base_url, "using book service");
    let client = match settings.request_timeout() {
        Some(timeout) => HttpBookClient::with_timeout(base_url, timeout)
            .context("failed to build http client")?,
        None => HttpBookClient::new(base_url),
    };

    let mut controller = LibraryController::new(Arc::new(client));
    controller.mount().await;

    match cli.command {
        Command::List => {
            print!("{}", render_screen(&controller.render()));
        }
        Command::Delete { id, yes } => delete(&mut controller, &id, yes).await?,
        Command::Edit { id, set } => edit(&mut controller, &id, &set).await?,
    }
    Ok(())
}

fn find_book(controller: &LibraryController, id: &str) -> Result<Book> {
    let screen = controller.render();
    if let Some(banner) = screen.error_banner {
        bail!("{banner}");
    }
    match screen.collection {
        CollectionView::Cards(books) => books
            .into_iter()
            .find(|book| book.id.matches(id))
            .ok_or_else(|| anyhow!("no book with id {id}")),
        _ => Err(anyhow!("no book with id {id}")),
    }
}

async fn delete(controller: &mut LibraryController, id: &str, yes: bool) -> Result<()> {
    let book = find_book(controller, id)?;
    controller.on_delete(book);

    if let Some(dialog) = controller.render().delete_dialog {
        print!("{}", render_delete_dialog(&dialog));
    }
    if !yes && !confirm_on_stdin()? {
        controller.on_close_delete();
        println!("Cancelled.");
        return Ok(());
    }

    if let Err(err) = controller.on_confirm_delete().await {
        if let Some(dialog) = controller.render().delete_dialog {
            print!("{}", render_delete_dialog(&dialog));
        }
        return Err(err).context("delete failed");
    }
    print!("{}", render_screen(&controller.render()));
    Ok(())
}

async fn edit(controller: &mut LibraryController, id: &str, assignments: &[String]) -> Result<()> {
    let updates = assignments
        .iter()
        .map(|assignment| -> Result<FieldUpdate> {
            let (name, value) = assignment
                .split_once('=')
                .ok_or_else(|| anyhow!("expected FIELD=VALUE, got '{assignment}'"))?;
            Ok(FieldUpdate::parse(name.trim(), value)?)
        })
        .collect::<Result<Vec<_>>>()?;

    let book = find_book(controller, id)?;
    controller.on_edit(book);
    for update in updates {
        controller.on_field_change(update)?;
    }

    match controller.on_save().await {
        Ok(()) => {
            print!("{}", render_screen(&controller.render()));
            Ok(())
        }
        Err(err) => {
            if let Some(dialog) = controller.render().edit_dialog {
                print!("{}", render_edit_dialog(&dialog));
            }
            let context = match err {
                ClientError::Validation(_) => "book not saved",
                _ => "save failed",
            };
            Err(err).context(context)
        }
    }
}

fn confirm_on_stdin() -> Result<bool> {
    print!("Delete? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
