//! `rolodex` — interactive contact book.
//!
//! # Usage
//!
//! ```
//! rolodex
//! rolodex --book ~/contacts.db
//! rolodex --config ~/.config/rolodex/config.toml
//! ```

mod app;
mod commands;
mod settings;

use std::{
  io::{self, BufRead, Write},
  path::PathBuf,
};

use anyhow::{Context, Result};
use app::{App, Reply};
use clap::Parser;
use rolodex_core::AddressBook;
use rolodex_store_sqlite::Session;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rolodex", version, about = "Interactive contact book")]
struct Args {
  /// Path to a TOML config file (book_path, batch_size, log_level).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Book file to open (default: address_book.db in the working directory).
  #[arg(short, long, value_name = "PATH")]
  book: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();
  let settings = Settings::load(args.config.as_deref(), args.book.as_deref())?;

  let default_level: LevelFilter = settings
    .log_level
    .parse()
    .with_context(|| format!("invalid log level {:?}", settings.log_level))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let mut session = Session::open(&settings.book_path).with_context(|| {
    format!("failed to open address book {}", settings.book_path.display())
  })?;

  // Save even if the loop fails; the loop's error wins.
  let run_result = run(&mut session, &settings);
  let close_result = session.close().context("failed to save address book");
  run_result.and(close_result)
}

// ─── Command loop ─────────────────────────────────────────────────────────────

fn run(book: &mut AddressBook, settings: &Settings) -> Result<()> {
  let mut app = App::new(book, settings.batch_size);
  let stdin = io::stdin();
  let mut stdout = io::stdout();

  writeln!(stdout, "Welcome to the assistant bot!")?;
  loop {
    write!(stdout, "Enter a command: ")?;
    stdout.flush()?;

    let mut line = String::new();
    if stdin.lock().read_line(&mut line)? == 0 {
      // End of input behaves like `exit`.
      writeln!(stdout)?;
      break;
    }

    match app.handle_line(&line) {
      Reply::Continue(text) => writeln!(stdout, "{text}")?,
      Reply::Exit(text) => {
        writeln!(stdout, "{text}")?;
        break;
      }
    }
  }
  Ok(())
}
