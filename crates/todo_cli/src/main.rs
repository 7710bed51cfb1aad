//! `todo` command-line front end.
//!
//! # Responsibility
//! - Capture text/priority/due-date input and call the core store.
//! - Print render instructions as plain text lines.
//!
//! # Invariants
//! - The in-memory list is printed even when persisting it failed.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use todo_core::db::{open_db, open_db_in_memory};
use todo_core::{
    default_log_level, flush_logging, init_logging, parse_due_date, render, render_line,
    LoadOutcome, Priority, SlotStorage, SqliteSlotStorage, StoreConfig, StoreResult, TodoFilter,
    TodoIndex, TodoStore, TodoStoreError,
};

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Keep a persistent to-do list")]
struct Cli {
    /// SQLite file holding the list; omit for an in-memory session
    #[arg(long, env = "TODO_DB", value_name = "PATH", global = true)]
    db: Option<PathBuf>,

    /// Storage slot name
    #[arg(long, env = "TODO_SLOT", global = true)]
    slot: Option<String>,

    /// Directory for rotated log files; logging is off when unset
    #[arg(long, env = "TODO_LOG_DIR", value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[arg(long, env = "TODO_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append a todo
    Add {
        text: String,
        #[arg(short, long, default_value = "low")]
        priority: Priority,
        /// Due date as YYYY-MM-DD
        #[arg(short, long)]
        due: Option<String>,
    },
    /// Flip completion of the todo at INDEX
    Toggle { index: usize },
    /// Show todos, optionally filtered by completion state
    List {
        #[arg(short, long, default_value = "all")]
        filter: TodoFilter,
    },
    /// Show item counts
    Stats,
}

fn main() -> Result<()> {
    let result = run(Cli::parse());
    flush_logging();
    result
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        start_logging(level, log_dir)?;
    }

    let config = StoreConfig::new(cli.db.clone(), cli.slot.as_deref());
    let conn = match &config.db_path {
        Some(path) => open_db(path)
            .with_context(|| format!("opening todo database {}", path.display()))?,
        None => open_db_in_memory().context("opening in-memory todo database")?,
    };

    let (mut store, outcome) = TodoStore::load(SqliteSlotStorage::new(&conn), config.slot.as_str());
    if let LoadOutcome::Recovered(failure) = &outcome {
        eprintln!("warning: stored todos could not be read, starting empty ({failure})");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&mut store, cli.command, &mut out)
}

fn start_logging(level: &str, log_dir: &Path) -> Result<()> {
    let log_dir = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .context("resolving current directory for --log-dir")?
            .join(log_dir)
    };
    let log_dir = log_dir
        .to_str()
        .with_context(|| format!("log directory {} is not valid UTF-8", log_dir.display()))?;
    init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    info!("event=cli_start module=cli status=ok");
    Ok(())
}

fn execute<S: SlotStorage>(
    store: &mut TodoStore<S>,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Add {
            text,
            priority,
            due,
        } => {
            let due_date = parse_due_date(due.as_deref().unwrap_or_default())?;
            let result = store.add(text, priority, due_date).map(|_| ());
            finish_mutation(store, result, out)
        }
        Command::Toggle { index } => {
            let result = store.toggle_completed(TodoIndex(index)).map(|_| ());
            finish_mutation(store, result, out)
        }
        Command::List { filter } => write_list(store, filter, out),
        Command::Stats => {
            let counts = store.counts();
            writeln!(
                out,
                "{} items: {} active, {} completed",
                counts.total, counts.active, counts.completed
            )?;
            Ok(())
        }
    }
}

fn finish_mutation<S: SlotStorage>(
    store: &TodoStore<S>,
    result: StoreResult<()>,
    out: &mut impl Write,
) -> Result<()> {
    match result {
        Ok(()) => write_list(store, TodoFilter::All, out),
        Err(err @ TodoStoreError::Persistence(_)) => {
            write_list(store, TodoFilter::All, out)?;
            Err(err).context("change kept for this session only")
        }
        Err(err) => Err(err.into()),
    }
}

fn write_list<S: SlotStorage>(
    store: &TodoStore<S>,
    filter: TodoFilter,
    out: &mut impl Write,
) -> Result<()> {
    let items = render(store.filter(filter));
    if items.is_empty() {
        match filter {
            TodoFilter::All => writeln!(out, "No todos.")?,
            other => writeln!(out, "No {other} todos.")?,
        }
        return Ok(());
    }
    for item in &items {
        writeln!(out, "{}", render_line(item))?;
    }
    Ok(())
}
